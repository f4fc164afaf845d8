//! Password reset: ask for instructions, then set a new password from the
//! emailed link.
use async_trait::async_trait;
use authforms_common::{FieldKind, FieldSpec};
use serde::Deserialize;

use super::{
    email_chain, new_password_chains, Form, CSRF_SPEC, MSG_EMAIL_INVALID, MSG_EMAIL_REQUIRED,
};
use crate::error::AppError;
use crate::storage::UserStore;
use crate::validation::FormErrors;
use crate::ValidationContext;

const RESET_FIELDS: &[FieldSpec] = &[
    CSRF_SPEC,
    FieldSpec::new("email", "Email", FieldKind::Email),
];

const COMPLETE_RESET_FIELDS: &[FieldSpec] = &[
    CSRF_SPEC,
    FieldSpec::new("password", "Password", FieldKind::Password),
    FieldSpec::new("password_repeat", "Repeat password", FieldKind::Password),
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetForm {
    pub email: String,
    pub csrf_token: Option<String>,
}

#[async_trait]
impl Form for ResetForm {
    const NAME: &'static str = "reset";
    const SUBMIT_LABEL: &'static str = "Request reset instructions";

    fn fields() -> &'static [FieldSpec] {
        RESET_FIELDS
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
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompleteResetForm {
    pub password: String,
    pub password_repeat: String,
    pub csrf_token: Option<String>,
}

#[async_trait]
impl Form for CompleteResetForm {
    const NAME: &'static str = "complete_reset";
    const SUBMIT_LABEL: &'static str = "Reset password";

    fn fields() -> &'static [FieldSpec] {
        COMPLETE_RESET_FIELDS
    }

    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    async fn check_fields<S>(
        &self,
        ctx: &ValidationContext<'_, S>,
        errors: &mut FormErrors,
    ) -> Result<(), AppError>
    where
        S: UserStore + ?Sized,
    {
        new_password_chains(
            errors,
            &self.password,
            &self.password_repeat,
            &ctx.password_policy(),
        );
        Ok(())
    }
}
