//! Validation and form submission against the resource rule sets

use crate::error::{SubmitError, SubmitFailure};
use crate::form::{API_KEY, Draft, FormMode, FormPhase, FormState, validate};
use crate::resources::{Customer, Employee, Resource, User};

fn valid_user_draft() -> Draft {
    Draft::from_pairs(&[
        ("Name", "Jane"),
        ("Email", "a@b.com"),
        ("Phone", "1234567890"),
        ("Address", "1 Main St"),
        ("ConnectionType", "Residential"),
    ])
}

#[test]
fn test_contact_rules_are_deterministic() {
    let draft = valid_user_draft();
    for rules in [User::form_rules(), Customer::form_rules(), Employee::form_rules()] {
        assert_eq!(validate(&draft, &rules), validate(&draft, &rules));
    }
    assert!(validate(&draft, &User::form_rules()).is_empty());
}

#[test]
fn test_every_required_field_reported() {
    let errors = validate(&User::template(), &User::form_rules());
    assert_eq!(errors.get("Name"), Some("Name is required"));
    assert_eq!(errors.get("Email"), Some("Email is required"));
    assert_eq!(errors.get("Phone"), Some("Phone is required"));
    assert_eq!(errors.get("Address"), Some("Address is required"));
    // Select fields start on their first option
    assert_eq!(errors.get("ConnectionType"), None);
}

#[test]
fn test_invalid_draft_never_reaches_collaborator() {
    let mut form: FormState<i64> = FormState::new(User::template());
    form.open_add();
    form.set_field("Name", "Jane");
    form.set_field("Phone", "555-1234");

    let mut called = false;
    let result = form.submit(&User::form_rules(), |_| {
        called = true;
        Ok(())
    });

    assert!(!called);
    assert!(matches!(result, Err(SubmitError::Invalid(_))));
    assert_eq!(form.errors().get("Phone"), Some("Phone must be exactly 10 digits"));
    assert_eq!(form.phase(), FormPhase::Open);
}

#[test]
fn test_edit_failure_keeps_prefilled_draft() {
    let user = User {
        id: 3,
        name: "Omar".to_string(),
        email: "omar@x.com".to_string(),
        phone: "5550001111".to_string(),
        address: "2 Side St".to_string(),
        connection_type: "Commercial".to_string(),
        created_at: None,
    };
    let mut form = FormState::new(User::template());
    form.open_edit(user.id, Draft::from_record(&user).unwrap());
    assert_eq!(form.mode(), &FormMode::Edit(3));
    assert_eq!(form.draft().get("Email"), "omar@x.com");

    form.set_field("Address", "3 Side St");
    let result = form.submit(&User::form_rules(), |_| {
        Err::<(), _>(SubmitFailure::new("response not ok (500)"))
    });

    assert!(matches!(result, Err(SubmitError::Rejected(_))));
    assert_eq!(form.errors().get(API_KEY), Some("response not ok (500)"));
    assert_eq!(form.draft().get("Address"), "3 Side St");
    assert_eq!(form.errors().field_errors().count(), 0);
    assert!(!form.is_submitting());
}
