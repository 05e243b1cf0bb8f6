use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const SOURCE_TYPES: [&str; 5] = ["Reservoir", "Well", "River", "Lake", "Borehole"];

const SOURCE_STATUSES: [&str; 3] = ["Active", "Maintenance", "Inactive"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct WaterSource {
    #[serde(rename = "SourceID")]
    pub id: i64,
    pub name: String,
    pub source_type: String,
    pub location: String,
    /// Megalitres
    pub capacity: f64,
    pub status: String,
}

impl Record for WaterSource {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for WaterSource {
    const KIND: ResourceKind = ResourceKind::WaterSources;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|s| s.name.as_str())
            .search(|s| s.location.as_str())
            .filter_on(|s| s.source_type.as_str(), &SOURCE_TYPES)
            .sort_key("name", "Name", |s| SortValue::text(&s.name))
            .sort_key("capacity", "Capacity", |s| SortValue::number(s.capacity))
            .default_sort("name", SortDirection::Asc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("Name", "Name", FieldRule::required())
            .select("SourceType", "Source type", &SOURCE_TYPES, FieldRule::required())
            .text("Location", "Location", FieldRule::required())
            .number("Capacity", "Capacity", FieldRule::required().range(0.0, 1e7))
            .select("Status", "Status", &SOURCE_STATUSES, FieldRule::required())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 5, |s: &Self| s.id.to_string()),
            Column::new("Name", 20, |s: &Self| s.name.clone()),
            Column::new("Type", 10, |s: &Self| s.source_type.clone()),
            Column::new("Location", 20, |s: &Self| s.location.clone()),
            Column::new("Capacity (ML)", 13, |s: &Self| format!("{:.0}", s.capacity)),
            Column::new("Status", 11, |s: &Self| s.status.clone()),
        ]
    }
}
