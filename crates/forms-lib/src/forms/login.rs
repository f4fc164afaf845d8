//! Log-in credentials.
use async_trait::async_trait;
use authforms_common::{FieldKind, FieldSpec};
use serde::Deserialize;

use super::{email_chain, Form, CSRF_SPEC, MSG_EMAIL_INVALID, MSG_EMAIL_REQUIRED};
use crate::error::AppError;
use crate::storage::UserStore;
use crate::validation::{required, FieldChain, FormErrors};
use crate::ValidationContext;

pub const MSG_LOGIN_PASSWORD_REQUIRED: &str = "Password cannot be empty.";

const FIELDS: &[FieldSpec] = &[
    CSRF_SPEC,
    FieldSpec::new("email", "Email", FieldKind::Email),
    FieldSpec::new("password", "Password", FieldKind::Password),
];

/// Credentials entered on the log-in page.
///
/// Only checks that both values are present and the address is well formed;
/// whether they match an account is the caller's business.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: Option<String>,
}

#[async_trait]
impl Form for LoginForm {
    const NAME: &'static str = "login";
    const SUBMIT_LABEL: &'static str = "Login";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    async fn check_fields<S>(
        &self,
        _ctx: &ValidationContext<'_, S>,
        errors: &mut FormErrors,
    ) -> Result<(), AppError>
    where
        S: UserStore + ?Sized,
    {
        errors.push(email_chain(&self.email, MSG_EMAIL_REQUIRED, MSG_EMAIL_INVALID));

        let mut password = FieldChain::new("password");
        password.run(|| required(&self.password, MSG_LOGIN_PASSWORD_REQUIRED));
        errors.push(password);

        Ok(())
    }
}
