//! In-progress record held by an add/edit form.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::rules::{FieldKind, RuleSet};

/// Field name -> raw input text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    fields: BTreeMap<String, String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Prefill a draft from an existing record: every top-level field is
    /// stringified, nulls become empty strings.
    pub fn from_record<R: Serialize>(record: &R) -> Result<Self, serde_json::Error> {
        let fields = match serde_json::to_value(record)? {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| {
                    let text = match v {
                        Value::Null => String::new(),
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (k, text)
                })
                .collect(),
            _ => BTreeMap::new(),
        };
        Ok(Self { fields })
    }

    /// Value of a field, empty when absent
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map_or("", String::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Build the JSON request body for the fields named in `rules`.
    ///
    /// Values are trimmed and typed per [`FieldKind`]; empty optional fields are
    /// left out so the backend applies its own defaults.
    pub fn to_json(&self, rules: &RuleSet) -> Value {
        let mut body = Map::new();
        for spec in rules.fields() {
            let raw = self.get(spec.name).trim();
            if raw.is_empty() && !spec.rule.required {
                continue;
            }
            let value = match spec.kind {
                FieldKind::Integer => raw
                    .parse::<i64>()
                    .map_or_else(|_| Value::String(raw.to_string()), Value::from),
                FieldKind::Number => raw
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map_or_else(|| Value::String(raw.to_string()), Value::Number),
                FieldKind::Text | FieldKind::Select => Value::String(raw.to_string()),
            };
            body.insert(spec.name.to_string(), value);
        }
        Value::Object(body)
    }
}
