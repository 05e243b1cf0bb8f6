use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind, opt_text};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const DEPARTMENTS: [&str; 5] = [
    "Operations",
    "Maintenance",
    "Billing",
    "Customer Service",
    "Quality",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Employee {
    #[serde(rename = "EmployeeID")]
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub hire_date: Option<String>,
}

impl Record for Employee {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Employee {
    const KIND: ResourceKind = ResourceKind::Employees;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|e| e.name.as_str())
            .search(|e| e.role.as_str())
            .search(|e| e.email.as_str())
            .search(|e| e.department.as_str())
            .filter_on(|e| e.department.as_str(), &DEPARTMENTS)
            .sort_key("name", "Name", |e| SortValue::text(&e.name))
            .sort_key("hired", "Hired", |e| SortValue::opt_date(e.hire_date.as_deref()))
            .default_sort("name", SortDirection::Asc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("Name", "Name", FieldRule::required())
            .text("Role", "Role", FieldRule::required())
            .text("Email", "Email", FieldRule::email())
            .text("Phone", "Phone", FieldRule::phone())
            .select("Department", "Department", &DEPARTMENTS, FieldRule::required())
            .text("HireDate", "Hire date", FieldRule::date())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 5, |e: &Self| e.id.to_string()),
            Column::new("Name", 20, |e: &Self| e.name.clone()),
            Column::new("Role", 16, |e: &Self| e.role.clone()),
            Column::new("Department", 16, |e: &Self| e.department.clone()),
            Column::new("Email", 24, |e: &Self| e.email.clone()),
            Column::new("Hired", 11, |e: &Self| opt_text(&e.hire_date)),
        ]
    }
}
