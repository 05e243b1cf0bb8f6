use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind, opt_text};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const ALERT_SEVERITIES: [&str; 3] = ["Info", "Warning", "Critical"];

/// System alert broadcast to operators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Alert {
    #[serde(rename = "AlertID")]
    pub id: i64,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub created_at: Option<String>,
}

impl Record for Alert {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

fn severity_rank(alert: &Alert) -> SortValue {
    ALERT_SEVERITIES
        .iter()
        .position(|s| s.eq_ignore_ascii_case(alert.severity.trim()))
        .map_or(SortValue::Missing, |i| SortValue::number(i as f64))
}

impl Resource for Alert {
    const KIND: ResourceKind = ResourceKind::Alerts;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|a| a.title.as_str())
            .search(|a| a.message.as_str())
            .filter_on(|a| a.severity.as_str(), &ALERT_SEVERITIES)
            .sort_key("created", "Created", |a| SortValue::opt_date(a.created_at.as_deref()))
            .sort_key("severity", "Severity", severity_rank)
            .default_sort("created", SortDirection::Desc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("Title", "Title", FieldRule::required())
            .text("Message", "Message", FieldRule::required())
            .select("Severity", "Severity", &ALERT_SEVERITIES, FieldRule::required())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 5, |a: &Self| a.id.to_string()),
            Column::new("Severity", 9, |a: &Self| a.severity.clone()),
            Column::new("Title", 24, |a: &Self| a.title.clone()),
            Column::new("Message", 36, |a: &Self| a.message.clone()),
            Column::new("Created", 20, |a: &Self| opt_text(&a.created_at)),
        ]
    }
}
