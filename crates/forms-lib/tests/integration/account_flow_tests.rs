//! Account editing end to end against the in-memory store
use authforms_lib::forms::AccountForm;
use authforms_lib::{Form, FormError};

use crate::test_utils::{alice, memory_state, ALICE_PASSWORD};

fn submission(current: &str, new: &str, repeat: &str, email: &str) -> AccountForm {
    AccountForm {
        current_password: current.to_string(),
        new_password: new.to_string(),
        new_password_repeat: repeat.to_string(),
        name: "alice".to_string(),
        email: email.to_string(),
        csrf_token: None,
    }
}

#[tokio::test]
async fn test_account_edit_scenarios() {
    let mut state = memory_state();
    // CSRF is covered separately
    std::sync::Arc::make_mut(&mut state.settings).csrf_enabled = false;
    let user = alice();

    // (current, new, repeat, email, fields expected to fail)
    let cases: &[(&str, &str, &str, &str, &[&str])] = &[
        (ALICE_PASSWORD, "", "", "alice@example.com", &[]),
        ("wrong-password", "", "", "alice@example.com", &["current_password"]),
        (ALICE_PASSWORD, "brand-new-pass", "brand-new-pass", "alice@example.com", &[]),
        (
            ALICE_PASSWORD,
            "brand-new-pass",
            "brand-new-pasS",
            "alice@example.com",
            &["new_password_repeat"],
        ),
        (ALICE_PASSWORD, "short", "short", "alice@example.com", &["new_password"]),
        (ALICE_PASSWORD, "", "", "bob@example.com", &["email"]),
        (ALICE_PASSWORD, "", "", "alice@new.example.com", &[]),
        ("", "", "", "", &["current_password", "email"]),
    ];

    for (current, new, repeat, email, failing) in cases {
        let ctx = state.context().with_user(&user);
        let outcome = submission(current, new, repeat, email).validate(&ctx).await;

        match outcome {
            Ok(()) => assert!(failing.is_empty(), "expected {failing:?} to fail"),
            Err(FormError::Invalid(errors)) => {
                let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
                assert_eq!(&fields, failing, "current={current:?} new={new:?} email={email:?}");
            },
            Err(FormError::Store(err)) => panic!("store failed: {err}"),
        }
    }
}

#[tokio::test]
async fn test_email_of_removed_account_becomes_available() {
    let mut state = memory_state();
    std::sync::Arc::make_mut(&mut state.settings).csrf_enabled = false;
    let user = alice();

    let form = submission(ALICE_PASSWORD, "", "", "bob@example.com");
    assert!(form.validate(&state.context().with_user(&user)).await.is_err());

    state.store.remove(2);
    assert!(form.validate(&state.context().with_user(&user)).await.is_ok());
}
