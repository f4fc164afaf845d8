//! Anti-forgery checks across forms
use authforms_lib::auth::csrf::{MSG_CSRF_INVALID, MSG_CSRF_MISSING};
use authforms_lib::auth::CsrfToken;
use authforms_lib::forms::{DeactivationForm, LoginForm};
use authforms_lib::{Form, FormError};

use crate::test_utils::memory_state;

fn login(token: Option<&str>) -> LoginForm {
    LoginForm {
        email: "alice@example.com".to_string(),
        password: "whatever".to_string(),
        csrf_token: token.map(str::to_string),
    }
}

#[tokio::test]
async fn test_matching_token_passes() {
    let state = memory_state();
    let issued = CsrfToken::generate();
    let ctx = state.context().with_csrf(&issued);

    assert!(login(Some(issued.as_str())).validate(&ctx).await.is_ok());
}

#[tokio::test]
async fn test_missing_and_forged_tokens_fail_first() {
    let state = memory_state();
    let issued = CsrfToken::generate();
    let ctx = state.context().with_csrf(&issued);

    let Err(FormError::Invalid(errors)) = DeactivationForm::default().validate(&ctx).await else {
        panic!("expected a CSRF failure");
    };
    assert_eq!(errors.get("csrf_token").unwrap(), [MSG_CSRF_MISSING]);

    let forged = CsrfToken::generate();
    let mut form = login(Some(forged.as_str()));
    form.email = "broken".to_string();
    let Err(FormError::Invalid(errors)) = form.validate(&ctx).await else {
        panic!("expected a CSRF failure");
    };
    // the token is reported ahead of the declared fields
    assert_eq!(errors.iter().next().unwrap().0, "csrf_token");
    assert_eq!(errors.get("csrf_token").unwrap(), [MSG_CSRF_INVALID]);
    assert!(errors.contains("email"));
}

#[tokio::test]
async fn test_disabled_or_unissued_tokens_are_not_checked() {
    let mut state = memory_state();
    let issued = CsrfToken::generate();

    // nothing issued for this request
    assert!(login(None).validate(&state.context()).await.is_ok());

    std::sync::Arc::make_mut(&mut state.settings).csrf_enabled = false;
    let ctx = state.context().with_csrf(&issued);
    assert!(login(Some("stale")).validate(&ctx).await.is_ok());
}
