//! Forms validated against the flat-file user store
use authforms_common::User;
use authforms_lib::forms::AccountForm;
use authforms_lib::validation::{unique_username, MSG_EMAIL_IN_USE, MSG_NAME_TAKEN};
use authforms_lib::{AppError, Form, FormError};

use crate::test_utils::{alice, cheap_hash, flat_file_state, ALICE_PASSWORD};

#[tokio::test]
async fn test_account_form_reads_flat_file_store() {
    let (mut state, _temp_dir) = flat_file_state().await;
    std::sync::Arc::make_mut(&mut state.settings).csrf_enabled = false;
    let user = alice();

    let form = AccountForm {
        current_password: ALICE_PASSWORD.to_string(),
        email: "carol@example.com".to_string(),
        ..AccountForm::prefilled(&user)
    };
    assert!(form.validate(&state.context().with_user(&user)).await.is_ok());

    // carol registers in the meantime
    state
        .store
        .upsert(User::new(3, "carol", "carol@example.com", cheap_hash("carol-password")))
        .await
        .unwrap();

    let Err(FormError::Invalid(errors)) = form.validate(&state.context().with_user(&user)).await
    else {
        panic!("expected the address to be taken");
    };
    assert_eq!(errors.get("email").unwrap(), [MSG_EMAIL_IN_USE]);
}

#[tokio::test]
async fn test_unique_username_against_flat_file() {
    let (state, _temp_dir) = flat_file_state().await;

    assert!(unique_username(&state.store, "bob").await.unwrap().is_err());
    let taken = unique_username(&state.store, "alice").await.unwrap().unwrap_err();
    assert_eq!(taken.message(), MSG_NAME_TAKEN);
    assert!(unique_username(&state.store, "dave").await.unwrap().is_ok());
}

#[tokio::test]
async fn test_corrupt_store_surfaces_as_store_error() {
    let (mut state, _temp_dir) = flat_file_state().await;
    std::sync::Arc::make_mut(&mut state.settings).csrf_enabled = false;
    std::fs::write(state.store.path(), "[{\"id\": \"one\"}]").unwrap();
    let user = alice();

    let form = AccountForm {
        current_password: ALICE_PASSWORD.to_string(),
        ..AccountForm::prefilled(&user)
    };
    let outcome = form.validate(&state.context().with_user(&user)).await;
    assert!(matches!(outcome, Err(FormError::Store(AppError::Store(_)))));
}
