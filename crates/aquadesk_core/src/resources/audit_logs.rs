use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const AUDIT_ACTIONS: [&str; 5] = ["Create", "Update", "Delete", "Login", "Logout"];

/// Entry in the backend's audit trail. Read-only from the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AuditLog {
    #[serde(rename = "_id")]
    pub id: String,
    pub action: String,
    pub entity: String,
    pub performed_by: String,
    pub details: String,
    pub timestamp: String,
}

impl Record for AuditLog {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Resource for AuditLog {
    const KIND: ResourceKind = ResourceKind::AuditLogs;
    const READ_ONLY: bool = true;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|a| a.action.as_str())
            .search(|a| a.entity.as_str())
            .search(|a| a.performed_by.as_str())
            .search(|a| a.details.as_str())
            .filter_on(|a| a.action.as_str(), &AUDIT_ACTIONS)
            .sort_key("timestamp", "Time", |a| SortValue::date(&a.timestamp))
            .sort_key("user", "User", |a| SortValue::text(&a.performed_by))
            .default_sort("timestamp", SortDirection::Desc)
            .page_size(20)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .select("Action", "Action", &AUDIT_ACTIONS, FieldRule::required())
            .text("Entity", "Entity", FieldRule::required())
            .text("PerformedBy", "Performed by", FieldRule::required())
            .text("Details", "Details", FieldRule::optional())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Time", 20, |a: &Self| a.timestamp.clone()),
            Column::new("Action", 8, |a: &Self| a.action.clone()),
            Column::new("Entity", 14, |a: &Self| a.entity.clone()),
            Column::new("By", 16, |a: &Self| a.performed_by.clone()),
            Column::new("Details", 36, |a: &Self| a.details.clone()),
        ]
    }
}
