//! In-memory backend for worker and screen tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use aquadesk_core::ResourceKind;
use serde_json::{Value, json};

use super::{ApiError, Backend};

#[derive(Default)]
pub struct FakeBackend {
    collections: Mutex<HashMap<ResourceKind, Vec<Value>>>,
    /// Ids whose DELETE answers 500
    failing_deletes: Mutex<BTreeSet<String>>,
    /// When set, every list call fails with this status
    list_status: Mutex<Option<u16>>,
    next_id: Mutex<i64>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(100),
            ..Self::default()
        }
    }

    pub fn with(self, kind: ResourceKind, records: Vec<Value>) -> Self {
        self.collections.lock().unwrap().insert(kind, records);
        self
    }

    pub fn fail_delete(&self, id: &str) {
        self.failing_deletes.lock().unwrap().insert(id.to_string());
    }

    pub fn fail_lists(&self, status: Option<u16>) {
        *self.list_status.lock().unwrap() = status;
    }

    pub fn ids(&self, kind: ResourceKind) -> Vec<String> {
        self.collections
            .lock()
            .unwrap()
            .get(&kind)
            .map(|items| items.iter().map(|r| id_of(kind, r)).collect())
            .unwrap_or_default()
    }
}

fn id_field(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Users => "UserID",
        ResourceKind::Connections => "ConnectionID",
        ResourceKind::Bills => "BillID",
        ResourceKind::Readings => "ReadingID",
        ResourceKind::WaterSources => "SourceID",
        ResourceKind::Employees => "EmployeeID",
        ResourceKind::Complaints | ResourceKind::AuditLogs => "_id",
        ResourceKind::Alerts => "AlertID",
        ResourceKind::Customers => "CustomerID",
        ResourceKind::QualityRecords => "RecordID",
    }
}

fn id_of(kind: ResourceKind, record: &Value) -> String {
    match &record[id_field(kind)] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Backend for FakeBackend {
    fn list(&self, kind: ResourceKind) -> Result<Vec<Value>, ApiError> {
        if let Some(status) = *self.list_status.lock().unwrap() {
            return Err(ApiError::from_status(status, ""));
        }
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    fn create(&self, kind: ResourceKind, body: &Value) -> Result<Value, ApiError> {
        if body.get("Email").and_then(Value::as_str) == Some("taken@example.com") {
            return Err(ApiError::from_status(
                400,
                r#"{"error": "Validation failed", "details": {"Email": "Email already registered"}}"#,
            ));
        }
        let mut record = body.clone();
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        record[id_field(kind)] = json!(*next);
        self.collections
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<Value, ApiError> {
        let mut collections = self.collections.lock().unwrap();
        let items = collections.entry(kind).or_default();
        let Some(existing) = items.iter_mut().find(|r| id_of(kind, r) == id) else {
            return Err(ApiError::from_status(404, r#"{"error": "Not found"}"#));
        };
        if let (Value::Object(target), Value::Object(patch)) = (&mut *existing, body) {
            for (k, v) in patch {
                target.insert(k.clone(), v.clone());
            }
        }
        Ok(existing.clone())
    }

    fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError> {
        if self.failing_deletes.lock().unwrap().contains(id) {
            return Err(ApiError::from_status(500, ""));
        }
        let mut collections = self.collections.lock().unwrap();
        let items = collections.entry(kind).or_default();
        let before = items.len();
        items.retain(|r| id_of(kind, r) != id);
        if items.len() == before {
            return Err(ApiError::from_status(404, ""));
        }
        Ok(())
    }
}
