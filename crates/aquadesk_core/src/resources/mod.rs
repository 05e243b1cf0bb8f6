//! Resource catalogue
//!
//! One module per backend collection. Each record type implements
//! [`Resource`], which bundles everything a generic list screen needs: the
//! REST path, list configuration, form rules and table columns.

mod alerts;
mod audit_logs;
mod bills;
mod complaints;
mod connections;
mod customers;
mod employees;
mod quality_records;
mod readings;
mod users;
mod water_sources;

use std::fmt;
use std::str::FromStr;

pub use alerts::{ALERT_SEVERITIES, Alert};
pub use audit_logs::{AUDIT_ACTIONS, AuditLog};
pub use bills::{BILL_STATUSES, Bill};
pub use complaints::{COMPLAINT_PRIORITIES, COMPLAINT_STATUSES, Complaint, priority_rank};
pub use connections::{
    CONNECTION_STATUSES, CONNECTIONS_STORAGE_KEY, Connection, MAX_CONNECTIONS_PER_USER,
    max_connections_warning, next_connection_id, seed_connections,
};
pub use customers::{CUSTOMER_STATUSES, Customer};
pub use employees::{DEPARTMENTS, Employee};
pub use quality_records::{QUALITY_STATUSES, QualityRecord};
pub use readings::{READING_STATUSES, Reading};
pub use users::{CONNECTION_TYPES, User};
pub use water_sources::{SOURCE_TYPES, WaterSource};

use crate::form::{Draft, FieldKind, RuleSet};
use crate::list::ListConfig;
use crate::record::Record;

/// Every collection the console manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Users,
    Connections,
    Bills,
    Readings,
    WaterSources,
    Employees,
    Complaints,
    Alerts,
    AuditLogs,
    Customers,
    QualityRecords,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Users,
        ResourceKind::Connections,
        ResourceKind::Bills,
        ResourceKind::Readings,
        ResourceKind::WaterSources,
        ResourceKind::Employees,
        ResourceKind::Complaints,
        ResourceKind::Alerts,
        ResourceKind::AuditLogs,
        ResourceKind::Customers,
        ResourceKind::QualityRecords,
    ];

    /// Path segment under `/api/`
    pub const fn path(self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::Connections => "connections",
            ResourceKind::Bills => "bills",
            ResourceKind::Readings => "readings",
            ResourceKind::WaterSources => "water-sources",
            ResourceKind::Employees => "employees",
            ResourceKind::Complaints => "complaints",
            ResourceKind::Alerts => "alerts",
            ResourceKind::AuditLogs => "audit",
            ResourceKind::Customers => "customers",
            ResourceKind::QualityRecords => "quality",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            ResourceKind::Users => "Users",
            ResourceKind::Connections => "Connections",
            ResourceKind::Bills => "Bills",
            ResourceKind::Readings => "Readings",
            ResourceKind::WaterSources => "Water Sources",
            ResourceKind::Employees => "Employees",
            ResourceKind::Complaints => "Complaints",
            ResourceKind::Alerts => "Alerts",
            ResourceKind::AuditLogs => "Audit Log",
            ResourceKind::Customers => "Customers",
            ResourceKind::QualityRecords => "Water Quality",
        }
    }

    /// Singular noun used in form titles and notices
    pub const fn noun(self) -> &'static str {
        match self {
            ResourceKind::Users => "user",
            ResourceKind::Connections => "connection",
            ResourceKind::Bills => "bill",
            ResourceKind::Readings => "reading",
            ResourceKind::WaterSources => "water source",
            ResourceKind::Employees => "employee",
            ResourceKind::Complaints => "complaint",
            ResourceKind::Alerts => "alert",
            ResourceKind::AuditLogs => "audit entry",
            ResourceKind::Customers => "customer",
            ResourceKind::QualityRecords => "quality record",
        }
    }

    /// Backend-written collections the console never edits
    pub const fn is_read_only(self) -> bool {
        matches!(self, ResourceKind::AuditLogs)
    }

    /// Local key-value slot for collections kept on the client instead of the backend
    pub const fn storage_key(self) -> Option<&'static str> {
        match self {
            ResourceKind::Connections => Some(CONNECTIONS_STORAGE_KEY),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Error returned when a screen name does not match any resource
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ResourceKind::ALL
            .into_iter()
            .find(|k| {
                k.path() == wanted || k.title().to_ascii_lowercase().replace(' ', "-") == wanted
            })
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// One table column: header, preferred width and cell formatter
pub struct Column<R> {
    pub header: &'static str,
    pub width: u16,
    pub cell: fn(&R) -> String,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            width: self.width,
            cell: self.cell,
        }
    }
}

impl<R> Column<R> {
    pub const fn new(header: &'static str, width: u16, cell: fn(&R) -> String) -> Self {
        Self {
            header,
            width,
            cell,
        }
    }
}

/// A record type the console can list and edit.
pub trait Resource: Record {
    const KIND: ResourceKind;

    /// Entries written by the backend itself (audit trail) are never edited
    const READ_ONLY: bool = false;

    fn list_config() -> ListConfig<Self>;

    fn form_rules() -> RuleSet;

    fn columns() -> Vec<Column<Self>>;

    /// Empty draft for the add form
    fn template() -> Draft {
        template_from_rules(&Self::form_rules())
    }

    /// Business rule that blocks submission regardless of field validity.
    ///
    /// `editing` is the id of the record being edited, if any.
    fn submission_guard(
        _items: &[Self],
        _draft: &Draft,
        _editing: Option<&Self::Id>,
    ) -> Option<String> {
        None
    }

    /// Records written to an empty local slot on first launch
    fn local_seed() -> Vec<Self> {
        Vec::new()
    }

    /// Give a locally created record its id. Backend collections get ids
    /// from the server and leave the record untouched.
    fn assign_local_id(&mut self, _items: &[Self]) {}
}

/// Empty strings for every field; selects start on their first option.
pub fn template_from_rules(rules: &RuleSet) -> Draft {
    let mut draft = Draft::new();
    for spec in rules.fields() {
        let initial = match spec.kind {
            FieldKind::Select => spec.options.first().copied().unwrap_or(""),
            _ => "",
        };
        draft.set(spec.name, initial);
    }
    draft
}

/// Shorthand for optional date cells
pub(crate) fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Render a money amount with two decimals
pub(crate) fn money(value: f64) -> String {
    format!("${value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parses_path_and_title() {
        assert_eq!("users".parse::<ResourceKind>(), Ok(ResourceKind::Users));
        assert_eq!("Water-Sources".parse::<ResourceKind>(), Ok(ResourceKind::WaterSources));
        assert_eq!("water_sources".parse::<ResourceKind>(), Ok(ResourceKind::WaterSources));
        assert_eq!("audit".parse::<ResourceKind>(), Ok(ResourceKind::AuditLogs));
        assert!("pipes".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_only_connections_are_local() {
        let local: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|k| k.storage_key().is_some())
            .collect();
        assert_eq!(local, vec![ResourceKind::Connections]);
        assert_eq!(
            ResourceKind::Connections.storage_key(),
            Some("waterSystem_connections")
        );
    }

    #[test]
    fn test_read_only_kind_matches_resource() {
        assert!(ResourceKind::AuditLogs.is_read_only());
        assert_eq!(ResourceKind::AuditLogs.is_read_only(), AuditLog::READ_ONLY);
        assert_eq!(ResourceKind::Bills.is_read_only(), Bill::READ_ONLY);
    }

    #[test]
    fn test_template_selects_start_on_first_option() {
        let draft = User::template();
        assert_eq!(draft.get("Name"), "");
        assert_eq!(draft.get("ConnectionType"), "Residential");
    }

    #[test]
    fn test_every_default_sort_key_exists() {
        fn check<R: Resource>() {
            let config = R::list_config();
            assert!(
                config.find_sort_key(config.default_sort).is_some(),
                "{} default sort '{}' missing",
                R::KIND,
                config.default_sort
            );
            assert!(!R::columns().is_empty());
        }
        check::<User>();
        check::<Connection>();
        check::<Bill>();
        check::<Reading>();
        check::<WaterSource>();
        check::<Employee>();
        check::<Complaint>();
        check::<Alert>();
        check::<AuditLog>();
        check::<Customer>();
        check::<QualityRecord>();
    }
}
