use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind, opt_text};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const CUSTOMER_STATUSES: [&str; 3] = ["Active", "Inactive", "Suspended"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub account_number: String,
    pub address: String,
    pub status: String,
    pub joined_date: Option<String>,
}

impl Record for Customer {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Customer {
    const KIND: ResourceKind = ResourceKind::Customers;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|c| c.name.as_str())
            .search(|c| c.email.as_str())
            .search(|c| c.account_number.as_str())
            .search(|c| c.phone.as_str())
            .filter_on(|c| c.status.as_str(), &CUSTOMER_STATUSES)
            .sort_key("name", "Name", |c| SortValue::text(&c.name))
            .sort_key("joined", "Joined", |c| SortValue::opt_date(c.joined_date.as_deref()))
            .default_sort("name", SortDirection::Asc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("Name", "Name", FieldRule::required())
            .text("Email", "Email", FieldRule::email())
            .text("Phone", "Phone", FieldRule::phone())
            .text("AccountNumber", "Account number", FieldRule::required())
            .text("Address", "Address", FieldRule::optional())
            .select("Status", "Status", &CUSTOMER_STATUSES, FieldRule::required())
            .text("JoinedDate", "Joined", FieldRule::date())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 5, |c: &Self| c.id.to_string()),
            Column::new("Account", 12, |c: &Self| c.account_number.clone()),
            Column::new("Name", 20, |c: &Self| c.name.clone()),
            Column::new("Email", 24, |c: &Self| c.email.clone()),
            Column::new("Status", 10, |c: &Self| c.status.clone()),
            Column::new("Joined", 11, |c: &Self| opt_text(&c.joined_date)),
        ]
    }
}
