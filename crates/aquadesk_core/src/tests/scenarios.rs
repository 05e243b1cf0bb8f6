//! End-to-end flows combining the list engine, forms and resource rules

use crate::error::SubmitError;
use crate::form::{Draft, FormPhase, FormState};
use crate::list::{ListState, Mutation};
use crate::resources::{
    Connection, Resource, User, max_connections_warning, next_connection_id, seed_connections,
};

#[test]
fn test_add_then_list() {
    let mut list = ListState::new(User::list_config());
    let mut form: FormState<i64> = FormState::new(User::template());
    form.open_add();
    for (field, value) in [
        ("Name", "Jane"),
        ("Phone", "5551234567"),
        ("Email", "jane@x.com"),
        ("Address", "1 Main St"),
        ("ConnectionType", "Residential"),
    ] {
        form.set_field(field, value);
    }

    // The backend echoes the draft back with an assigned id
    let created = form
        .submit(&User::form_rules(), |draft| {
            let mut body = draft.to_json(&User::form_rules());
            body["UserID"] = 1.into();
            Ok(serde_json::from_value::<User>(body).unwrap())
        })
        .unwrap();
    assert_eq!(form.phase(), FormPhase::Closed);

    list.apply_mutation(Mutation::Create(created)).unwrap();
    let view = list.view();
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.total_filtered, 1);
    assert_eq!(view.page_items[0].name, "Jane");
    assert_eq!(view.page_items[0].connection_type, "Residential");
}

#[test]
fn test_bulk_delete_selected() {
    let users = (1..=5)
        .map(|id| User {
            id,
            name: format!("User {id}"),
            ..User::default()
        })
        .collect();
    let mut list = ListState::with_items(User::list_config(), users);
    list.toggle_select(&2);
    list.toggle_select(&4);

    let ids = list.selected_in_order();
    assert_eq!(ids, vec![2, 4]);
    let removed = list.apply_mutation(Mutation::BulkDelete(ids)).unwrap();

    assert_eq!(removed, vec![2, 4]);
    let remaining: Vec<i64> = list.items().iter().map(|u| u.id).collect();
    assert_eq!(remaining, vec![1, 3, 5]);
    assert_eq!(list.selection_len(), 0);
}

#[test]
fn test_third_connection_for_user_is_blocked() {
    let existing = vec![
        Connection {
            id: "CONN-001".to_string(),
            user_id: 7,
            ..Connection::default()
        },
        Connection {
            id: "CONN-002".to_string(),
            user_id: 7,
            ..Connection::default()
        },
    ];
    let list = ListState::with_items(Connection::list_config(), existing);
    let rules = Connection::form_rules();
    let mut form: FormState<String> = FormState::new(Connection::template());
    form.open_add();
    for (field, value) in [
        ("UserID", "7"),
        ("MeterNumber", "MTR-2001"),
        ("Address", "9 Ridge Rd"),
        ("ConnectionType", "Residential"),
        ("Status", "Active"),
        ("InstallationDate", "2024-08-01"),
    ] {
        form.set_field(field, value);
    }
    form.set_warning(Connection::submission_guard(list.items(), form.draft(), None));

    assert_eq!(
        form.warning(),
        Some("User 7 already has the maximum of 2 connections")
    );
    assert!(crate::form::validate(form.draft(), &rules).is_empty());

    let mut called = false;
    let result = form.submit(&rules, |_| {
        called = true;
        Ok(())
    });
    assert!(!called);
    assert!(matches!(result, Err(SubmitError::Blocked(_))));
    assert!(form.errors().is_empty());

    // Switching to a user with room clears the warning
    form.set_field("UserID", "8");
    form.set_warning(Connection::submission_guard(list.items(), form.draft(), None));
    assert_eq!(form.warning(), None);
}

#[test]
fn test_local_connection_create() {
    let mut list = ListState::with_items(Connection::list_config(), seed_connections());
    let draft = Draft::from_pairs(&[("UserID", "3"), ("MeterNumber", "MTR-3003")]);
    assert_eq!(max_connections_warning(list.items(), 3, None), None);

    let record = Connection {
        id: next_connection_id(list.items()),
        user_id: draft.get("UserID").parse().unwrap(),
        meter_number: draft.get("MeterNumber").to_string(),
        ..Connection::default()
    };
    let touched = list.apply_mutation(Mutation::Create(record)).unwrap();
    assert_eq!(touched, vec!["CONN-005".to_string()]);
    assert_eq!(list.len(), 5);
}
