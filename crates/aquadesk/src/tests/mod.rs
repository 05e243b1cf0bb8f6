//! Screen-state flows driven against the in-memory backend
//!
//! Tests are organized by topic:
//! - `remote` - Loading, saving and deleting through REST collections
//! - `local` - The connections collection kept in local storage


use aquadesk_core::ResourceKind;
use serde_json::{Value, json};

use crate::api::fake::FakeBackend;
use crate::config::AppConfig;
use crate::state::{AppState, ResourceState, ScreenId, ScreenResource};
use crate::worker;

pub(crate) fn app_state(kind: ResourceKind) -> AppState {
    AppState::new(AppConfig::default(), ScreenId::Resource(kind))
}

/// Run every queued request synchronously and deliver the answers the way
/// the app loop does: only to the mount that asked.
///
/// Returns how many responses were dropped as stale.
pub(crate) fn flush<R: ScreenResource>(
    screen: &mut ResourceState<R>,
    state: &mut AppState,
    backend: &FakeBackend,
) -> usize {
    let mut dropped = 0;
    loop {
        let requests = state.take_outbox();
        if requests.is_empty() {
            return dropped;
        }
        for request in requests {
            let outcome = worker::execute(backend, request.kind, request.call);
            if !state.mounts.is_current(&request.token) {
                dropped += 1;
                continue;
            }
            if request.token.screen == ScreenId::Directory {
                continue;
            }
            screen.handle_response(outcome, state);
        }
    }
}

pub(crate) fn bills(ids: &[i64]) -> Vec<Value> {
    ids.iter()
        .map(|id| {
            json!({
                "BillID": id,
                "ConnectionID": "CONN-001",
                "BillingPeriod": "2024-05",
                "Amount": 20.0 + *id as f64,
                "DueDate": "2024-06-15",
                "Status": "Unpaid"
            })
        })
        .collect()
}

pub(crate) fn user(id: i64, name: &str) -> Value {
    json!({
        "UserID": id,
        "Name": name,
        "Email": format!("user{id}@example.com"),
        "Phone": "5551234567",
        "Address": "1 Main St",
        "ConnectionType": "Residential"
    })
}
