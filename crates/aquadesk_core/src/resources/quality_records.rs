use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const QUALITY_STATUSES: [&str; 3] = ["Safe", "Warning", "Unsafe"];

/// Laboratory test of a water source sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct QualityRecord {
    #[serde(rename = "RecordID")]
    pub id: i64,
    pub source_name: String,
    pub test_date: String,
    #[serde(rename = "pH")]
    pub ph: f64,
    /// NTU
    pub turbidity: f64,
    /// mg/L
    pub chlorine: f64,
    pub tested_by: String,
    pub status: String,
}

impl Record for QualityRecord {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for QualityRecord {
    const KIND: ResourceKind = ResourceKind::QualityRecords;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|q| q.source_name.as_str())
            .search(|q| q.tested_by.as_str())
            .filter_on(|q| q.status.as_str(), &QUALITY_STATUSES)
            .sort_key("tested", "Tested", |q| SortValue::date(&q.test_date))
            .sort_key("ph", "pH", |q| SortValue::number(q.ph))
            .default_sort("tested", SortDirection::Desc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("SourceName", "Source", FieldRule::required())
            .text("TestDate", "Test date", FieldRule { required: true, ..FieldRule::date() })
            .number("pH", "pH", FieldRule::required().range(0.0, 14.0))
            .number("Turbidity", "Turbidity", FieldRule::required().range(0.0, 1000.0))
            .number("Chlorine", "Chlorine", FieldRule::required().range(0.0, 10.0))
            .text("TestedBy", "Tested by", FieldRule::required())
            .select("Status", "Status", &QUALITY_STATUSES, FieldRule::required())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 5, |q: &Self| q.id.to_string()),
            Column::new("Source", 18, |q: &Self| q.source_name.clone()),
            Column::new("Tested", 11, |q: &Self| q.test_date.clone()),
            Column::new("pH", 5, |q: &Self| format!("{:.1}", q.ph)),
            Column::new("NTU", 6, |q: &Self| format!("{:.1}", q.turbidity)),
            Column::new("Cl mg/L", 8, |q: &Self| format!("{:.2}", q.chlorine)),
            Column::new("By", 14, |q: &Self| q.tested_by.clone()),
            Column::new("Status", 8, |q: &Self| q.status.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Draft, validate};

    #[test]
    fn test_chemistry_ranges() {
        let draft = Draft::from_pairs(&[
            ("SourceName", "North Reservoir"),
            ("TestDate", "2024-05-01"),
            ("pH", "14.5"),
            ("Turbidity", "1200"),
            ("Chlorine", "0.8"),
            ("TestedBy", "Lab A"),
            ("Status", "Safe"),
        ]);
        let errors = validate(&draft, &QualityRecord::form_rules());
        assert_eq!(errors.get("pH"), Some("pH must be between 0 and 14"));
        assert_eq!(errors.get("Turbidity"), Some("Turbidity must be between 0 and 1000"));
        assert_eq!(errors.get("Chlorine"), None);
        assert_eq!(errors.len(), 2);
    }
}
