use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind};
use crate::form::rules::METER_NUMBER;
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const READING_STATUSES: [&str; 3] = ["Pending", "Verified", "Flagged"];

/// Meter reading taken by a field technician
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Reading {
    #[serde(rename = "ReadingID")]
    pub id: i64,
    pub meter_number: String,
    pub reading_value: f64,
    pub reading_date: String,
    pub recorded_by: String,
    pub status: String,
}

impl Record for Reading {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Reading {
    const KIND: ResourceKind = ResourceKind::Readings;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|r| r.meter_number.as_str())
            .search(|r| r.recorded_by.as_str())
            .filter_on(|r| r.status.as_str(), &READING_STATUSES)
            .sort_key("date", "Date", |r| SortValue::date(&r.reading_date))
            .sort_key("value", "Value", |r| SortValue::number(r.reading_value))
            .sort_key("meter", "Meter", |r| SortValue::text(&r.meter_number))
            .default_sort("date", SortDirection::Desc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text(
                "MeterNumber",
                "Meter number",
                FieldRule::required()
                    .pattern(&METER_NUMBER, "Meter number must look like MTR-1001"),
            )
            .number("ReadingValue", "Reading", FieldRule::required().range(0.0, 1e9))
            .text("ReadingDate", "Reading date", FieldRule { required: true, ..FieldRule::date() })
            .text("RecordedBy", "Recorded by", FieldRule::required())
            .select("Status", "Status", &READING_STATUSES, FieldRule::required())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 6, |r: &Self| r.id.to_string()),
            Column::new("Meter", 10, |r: &Self| r.meter_number.clone()),
            Column::new("Value", 10, |r: &Self| format!("{:.1}", r.reading_value)),
            Column::new("Date", 11, |r: &Self| r.reading_date.clone()),
            Column::new("Recorded by", 16, |r: &Self| r.recorded_by.clone()),
            Column::new("Status", 9, |r: &Self| r.status.clone()),
        ]
    }
}
