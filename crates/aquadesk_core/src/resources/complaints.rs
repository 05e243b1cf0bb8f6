use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind, opt_text};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const COMPLAINT_STATUSES: [&str; 4] = ["Open", "In Progress", "Resolved", "Closed"];

pub const COMPLAINT_PRIORITIES: [&str; 4] = ["Low", "Medium", "High", "Critical"];

/// Position of `priority` in [`COMPLAINT_PRIORITIES`]; unknown values sort last
pub fn priority_rank(priority: &str) -> SortValue {
    COMPLAINT_PRIORITIES
        .iter()
        .position(|p| p.eq_ignore_ascii_case(priority.trim()))
        .map_or(SortValue::Missing, |i| SortValue::number(i as f64))
}

/// Customer complaint, keyed by the document store's `_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Complaint {
    #[serde(rename = "_id")]
    pub id: String,
    pub customer_name: String,
    pub subject: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: Option<String>,
}

impl Record for Complaint {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Resource for Complaint {
    const KIND: ResourceKind = ResourceKind::Complaints;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|c| c.customer_name.as_str())
            .search(|c| c.subject.as_str())
            .search(|c| c.description.as_str())
            .filter_on(|c| c.status.as_str(), &COMPLAINT_STATUSES)
            .sort_key("created", "Created", |c| SortValue::opt_date(c.created_at.as_deref()))
            .sort_key("priority", "Priority", |c| priority_rank(&c.priority))
            .default_sort("created", SortDirection::Desc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("CustomerName", "Customer", FieldRule::required())
            .text("Subject", "Subject", FieldRule::required())
            .text("Description", "Description", FieldRule::required())
            .select("Priority", "Priority", &COMPLAINT_PRIORITIES, FieldRule::required())
            .select("Status", "Status", &COMPLAINT_STATUSES, FieldRule::required())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Customer", 18, |c: &Self| c.customer_name.clone()),
            Column::new("Subject", 28, |c: &Self| c.subject.clone()),
            Column::new("Priority", 9, |c: &Self| c.priority.clone()),
            Column::new("Status", 12, |c: &Self| c.status.clone()),
            Column::new("Created", 12, |c: &Self| opt_text(&c.created_at)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_orders_by_severity() {
        assert_eq!(priority_rank("low"), SortValue::Number(0.0));
        assert_eq!(priority_rank(" Critical "), SortValue::Number(3.0));
        assert_eq!(priority_rank("urgent"), SortValue::Missing);
    }

    #[test]
    fn test_underscore_id_field() {
        let c: Complaint =
            serde_json::from_str(r#"{"_id": "65f0a1", "Subject": "Low pressure"}"#).unwrap();
        assert_eq!(c.id(), "65f0a1");
        assert_eq!(c.subject, "Low pressure");
    }
}
