use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind, opt_text};
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const CONNECTION_TYPES: [&str; 3] = ["Residential", "Commercial", "Industrial"];

/// Account holder registered with the utility
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "UserID")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub connection_type: String,
    pub created_at: Option<String>,
}

impl Record for User {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::Users;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|u| u.name.as_str())
            .search(|u| u.email.as_str())
            .search(|u| u.phone.as_str())
            .search(|u| u.address.as_str())
            .filter_on(|u| u.connection_type.as_str(), &CONNECTION_TYPES)
            .sort_key("name", "Name", |u| SortValue::text(&u.name))
            .sort_key("created", "Created", |u| {
                SortValue::opt_date(u.created_at.as_deref())
            })
            .default_sort("name", SortDirection::Asc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("Name", "Name", FieldRule::required())
            .text("Email", "Email", FieldRule::email())
            .text("Phone", "Phone", FieldRule::phone())
            .text("Address", "Address", FieldRule::required())
            .select(
                "ConnectionType",
                "Connection type",
                &CONNECTION_TYPES,
                FieldRule::required(),
            )
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 6, |u: &Self| u.id.to_string()),
            Column::new("Name", 20, |u: &Self| u.name.clone()),
            Column::new("Email", 26, |u: &Self| u.email.clone()),
            Column::new("Phone", 12, |u: &Self| u.phone.clone()),
            Column::new("Type", 12, |u: &Self| u.connection_type.clone()),
            Column::new("Created", 12, |u: &Self| opt_text(&u.created_at)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Draft, validate};

    #[test]
    fn test_backend_field_names() {
        let user: User = serde_json::from_str(
            r#"{"UserID": 7, "Name": "Jane", "Email": "jane@x.com", "Phone": "5551234567",
                "Address": "1 Main St", "ConnectionType": "Residential"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.connection_type, "Residential");
        assert_eq!(user.created_at, None);
    }

    #[test]
    fn test_form_rules_accept_valid_user() {
        let draft = Draft::from_pairs(&[
            ("Name", "Jane"),
            ("Email", "a@b.com"),
            ("Phone", "1234567890"),
            ("Address", "1 Main St"),
            ("ConnectionType", "Commercial"),
        ]);
        assert!(validate(&draft, &User::form_rules()).is_empty());
    }
}
