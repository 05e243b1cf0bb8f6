//! Service connections. Unlike every other resource these live in a local
//! key-value slot rather than behind the REST API.

use serde::{Deserialize, Serialize};

use super::users::CONNECTION_TYPES;
use super::{Column, Resource, ResourceKind};
use crate::form::{Draft, FieldRule, RuleSet, rules::METER_NUMBER};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const CONNECTIONS_STORAGE_KEY: &str = "waterSystem_connections";

pub const CONNECTION_STATUSES: [&str; 4] = ["Active", "Pending", "Suspended", "Disconnected"];

/// A user may hold at most this many connections
pub const MAX_CONNECTIONS_PER_USER: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Connection {
    #[serde(rename = "ConnectionID")]
    pub id: String,
    #[serde(rename = "UserID")]
    pub user_id: i64,
    pub meter_number: String,
    pub address: String,
    pub connection_type: String,
    pub status: String,
    pub installation_date: String,
}

impl Record for Connection {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

/// Blocking warning when `user_id` already holds the maximum number of
/// connections. The connection being edited, if any, does not count.
pub fn max_connections_warning(
    items: &[Connection],
    user_id: i64,
    editing: Option<&str>,
) -> Option<String> {
    let held = items
        .iter()
        .filter(|c| c.user_id == user_id && Some(c.id.as_str()) != editing)
        .count();
    (held >= MAX_CONNECTIONS_PER_USER).then(|| {
        format!("User {user_id} already has the maximum of {MAX_CONNECTIONS_PER_USER} connections")
    })
}

/// Next client-side id: `CONN-` followed by one more than the highest numeric suffix
pub fn next_connection_id(items: &[Connection]) -> String {
    let highest = items
        .iter()
        .filter_map(|c| c.id.strip_prefix("CONN-"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("CONN-{:03}", highest + 1)
}

/// Records written to an empty slot on first launch
pub fn seed_connections() -> Vec<Connection> {
    let seed = |id: &str,
                user_id,
                meter: &str,
                address: &str,
                kind: &str,
                status: &str,
                date: &str| Connection {
        id: id.to_string(),
        user_id,
        meter_number: meter.to_string(),
        address: address.to_string(),
        connection_type: kind.to_string(),
        status: status.to_string(),
        installation_date: date.to_string(),
    };
    vec![
        seed("CONN-001", 1, "MTR-1001", "12 Lakeview Rd", "Residential", "Active", "2023-03-14"),
        seed("CONN-002", 2, "MTR-1002", "48 Harbor St", "Commercial", "Active", "2023-06-02"),
        seed("CONN-003", 3, "MTR-1003", "7 Mill Lane", "Residential", "Pending", "2024-01-20"),
        seed("CONN-004", 2, "MTR-1004", "50 Harbor St", "Industrial", "Suspended", "2024-04-11"),
    ]
}

impl Resource for Connection {
    const KIND: ResourceKind = ResourceKind::Connections;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|c| c.meter_number.as_str())
            .search(|c| c.address.as_str())
            .search(|c| c.id.as_str())
            .filter_on(|c| c.status.as_str(), &CONNECTION_STATUSES)
            .sort_key("installed", "Installed", |c| SortValue::date(&c.installation_date))
            .sort_key("meter", "Meter", |c| SortValue::text(&c.meter_number))
            .sort_key("user", "User", |c| SortValue::number(c.user_id as f64))
            .default_sort("installed", SortDirection::Desc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .integer("UserID", "User ID", FieldRule::required().range(1.0, 1e9))
            .text(
                "MeterNumber",
                "Meter number",
                FieldRule::required()
                    .pattern(&METER_NUMBER, "Meter number must look like MTR-1001"),
            )
            .text("Address", "Address", FieldRule::required())
            .select(
                "ConnectionType",
                "Connection type",
                &CONNECTION_TYPES,
                FieldRule::required(),
            )
            .select("Status", "Status", &CONNECTION_STATUSES, FieldRule::required())
            .text("InstallationDate", "Installation date", FieldRule::date())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 9, |c: &Self| c.id.clone()),
            Column::new("User", 6, |c: &Self| c.user_id.to_string()),
            Column::new("Meter", 10, |c: &Self| c.meter_number.clone()),
            Column::new("Address", 22, |c: &Self| c.address.clone()),
            Column::new("Type", 12, |c: &Self| c.connection_type.clone()),
            Column::new("Status", 12, |c: &Self| c.status.clone()),
            Column::new("Installed", 11, |c: &Self| c.installation_date.clone()),
        ]
    }

    fn submission_guard(items: &[Self], draft: &Draft, editing: Option<&String>) -> Option<String> {
        let user_id = draft.get("UserID").trim().parse::<i64>().ok()?;
        max_connections_warning(items, user_id, editing.map(String::as_str))
    }

    fn local_seed() -> Vec<Self> {
        seed_connections()
    }

    fn assign_local_id(&mut self, items: &[Self]) {
        if self.id.trim().is_empty() {
            self.id = next_connection_id(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: &str, user_id: i64) -> Connection {
        Connection {
            id: id.to_string(),
            user_id,
            ..Connection::default()
        }
    }

    #[test]
    fn test_warning_at_limit() {
        let items = vec![conn("CONN-001", 7), conn("CONN-002", 7), conn("CONN-003", 8)];
        assert_eq!(
            max_connections_warning(&items, 7, None).as_deref(),
            Some("User 7 already has the maximum of 2 connections")
        );
        assert_eq!(max_connections_warning(&items, 8, None), None);
        assert_eq!(max_connections_warning(&items, 9, None), None);
    }

    #[test]
    fn test_edited_connection_does_not_count() {
        let items = vec![conn("CONN-001", 7), conn("CONN-002", 7)];
        assert_eq!(max_connections_warning(&items, 7, Some("CONN-002")), None);
    }

    #[test]
    fn test_guard_ignores_unparsable_user() {
        let items = vec![conn("CONN-001", 7), conn("CONN-002", 7)];
        let draft = Draft::from_pairs(&[("UserID", "seven")]);
        assert_eq!(Connection::submission_guard(&items, &draft, None), None);
    }

    #[test]
    fn test_next_id_follows_highest_suffix() {
        assert_eq!(next_connection_id(&[]), "CONN-001");
        let items = vec![conn("CONN-004", 1), conn("CONN-010", 1), conn("legacy", 1)];
        assert_eq!(next_connection_id(&items), "CONN-011");
    }

    #[test]
    fn test_assign_local_id_keeps_existing() {
        let items = seed_connections();
        let mut fresh = Connection::default();
        fresh.assign_local_id(&items);
        assert_eq!(fresh.id, "CONN-005");

        let mut kept = conn("CONN-042", 1);
        kept.assign_local_id(&items);
        assert_eq!(kept.id, "CONN-042");
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let seed = seed_connections();
        let mut ids: Vec<_> = seed.iter().map(|c| c.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), seed.len());
    }

    #[test]
    fn test_storage_round_trip_uses_backend_names() {
        let json = serde_json::to_value(&seed_connections()[0]).unwrap();
        assert_eq!(json["ConnectionID"], "CONN-001");
        assert_eq!(json["UserID"], 1);
        assert_eq!(json["MeterNumber"], "MTR-1001");
    }
}
