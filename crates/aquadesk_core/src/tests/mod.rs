//! Scenario tests for the list engine and forms
//!
//! Tests are organized by topic:
//! - `view_properties` - Filtering, pagination coverage and sort order over generated collections
//! - `selection` - Selection subset invariant and view reset
//! - `forms` - Validation and the submit state machine against real resource rules
//! - `scenarios` - End-to-end add, bulk delete and connection-limit flows

mod forms;
mod scenarios;

use crate::resources::{Bill, User};

/// Deterministic users with repeated names and mixed connection types
pub(crate) fn sample_users(count: i64) -> Vec<User> {
    const NAMES: [&str; 6] = [
        "Jane Park",
        "Omar Haddad",
        "li wei",
        "Ana Souza",
        "jane doe",
        "Ben Ito",
    ];
    const TYPES: [&str; 3] = ["Residential", "Commercial", "Industrial"];
    (1..=count)
        .map(|i| {
            let idx = i as usize;
            User {
                id: i,
                name: NAMES[idx % NAMES.len()].to_string(),
                email: format!("user{i}@example.com"),
                phone: format!("555{i:07}"),
                address: format!("{} Main St", 100 + i),
                connection_type: TYPES[idx % TYPES.len()].to_string(),
                created_at: (idx % 5 != 0)
                    .then(|| format!("2024-{:02}-{:02}", 1 + idx % 12, 1 + idx % 28)),
            }
        })
        .collect()
}

pub(crate) fn sample_bills(count: i64) -> Vec<Bill> {
    (1..=count)
        .map(|i| Bill {
            id: i,
            connection_id: format!("CONN-{:03}", 1 + i % 4),
            billing_period: format!("2024-{:02}", 1 + i % 12),
            amount: ((i * 37) % 250) as f64 + 0.5,
            due_date: format!("2024-{:02}-15", 1 + i % 12),
            issue_date: None,
            status: ["Unpaid", "Paid", "Overdue"][(i % 3) as usize].to_string(),
        })
        .collect()
}
