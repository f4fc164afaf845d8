//! Two-step registration: request an invitation by email, then pick a name
//! and password from the emailed link.
use async_trait::async_trait;
use authforms_common::{FieldKind, FieldSpec};
use serde::Deserialize;

use super::{
    email_chain, new_password_chains, Form, CSRF_SPEC, MSG_EMAIL_INVALID, MSG_EMAIL_REQUIRED,
    MSG_NAME_REQUIRED,
};
use crate::error::AppError;
use crate::storage::UserStore;
use crate::validation::{required, FieldChain, FormErrors};
use crate::ValidationContext;

const SIGNUP_FIELDS: &[FieldSpec] = &[
    CSRF_SPEC,
    FieldSpec::new("email", "Email", FieldKind::Email),
];

const COMPLETE_SIGNUP_FIELDS: &[FieldSpec] = &[
    CSRF_SPEC,
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("password", "Password", FieldKind::Password),
    FieldSpec::new("password_repeat", "Repeat password", FieldKind::Password),
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub email: String,
    pub csrf_token: Option<String>,
}

#[async_trait]
impl Form for SignupForm {
    const NAME: &'static str = "signup";
    const SUBMIT_LABEL: &'static str = "Register";

    fn fields() -> &'static [FieldSpec] {
        SIGNUP_FIELDS
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

/// Final registration step: display name and initial password
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompleteSignupForm {
    pub name: String,
    pub password: String,
    pub password_repeat: String,
    pub csrf_token: Option<String>,
}

#[async_trait]
impl Form for CompleteSignupForm {
    const NAME: &'static str = "complete_signup";
    const SUBMIT_LABEL: &'static str = "Register";

    fn fields() -> &'static [FieldSpec] {
        COMPLETE_SIGNUP_FIELDS
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
        let mut name = FieldChain::new("name");
        name.run(|| required(&self.name, MSG_NAME_REQUIRED));
        errors.push(name);

        new_password_chains(
            errors,
            &self.password,
            &self.password_repeat,
            &ctx.password_policy(),
        );
        Ok(())
    }
}
