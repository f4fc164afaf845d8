// ============================
// crates/forms-lib/src/forms/mod.rs
// ============================
//! Form definitions.
//!
//! Every form is a plain struct deserialized from the submitted body (absent
//! fields are empty) and validated against a [`ValidationContext`]. Messages
//! come back per field, in the order the fields are declared.

pub mod account;
pub mod login;
pub mod reset;
pub mod signup;

pub use account::{AccountForm, DeactivationForm, RoleChangeForm};
pub use login::LoginForm;
pub use reset::{CompleteResetForm, ResetForm};
pub use signup::{CompleteSignupForm, SignupForm};

use async_trait::async_trait;
use authforms_common::{FieldKind, FieldSpec};
use metrics::counter;

use crate::auth::{verify_csrf, CSRF_FIELD};
use crate::config::PasswordPolicy;
use crate::error::{AppError, FormError};
use crate::metrics::{FORM_REJECTED, FORM_STORE_ERROR, FORM_VALIDATED};
use crate::storage::UserStore;
use crate::validation::{
    email_format, password_repeat, required, valid_password, FieldChain, FormErrors,
};
use crate::ValidationContext;

/// Hidden anti-forgery field every form carries
pub const CSRF_SPEC: FieldSpec = FieldSpec::new(CSRF_FIELD, "CSRF Token", FieldKind::Hidden);

pub const MSG_EMAIL_REQUIRED: &str = "Email address is not filled in";
pub const MSG_EMAIL_INVALID: &str = "Entered value is not a valid email address";
pub const MSG_NAME_REQUIRED: &str = "Name is not filled in.";
pub const MSG_PASSWORD_REQUIRED: &str = "Password is not filled in.";
pub const MSG_REPEAT_REQUIRED: &str = "Repeated password is not filled in.";

#[async_trait]
pub trait Form: Send + Sync {
    /// Short identifier used in logs and metrics
    const NAME: &'static str;
    /// Caption of the submit button
    const SUBMIT_LABEL: &'static str;

    /// Field descriptors for renderers, in declaration order
    fn fields() -> &'static [FieldSpec];

    /// Anti-forgery token as submitted
    fn csrf_token(&self) -> Option<&str>;

    /// Run every field's chain, pushing messages into `errors`
    async fn check_fields<S>(
        &self,
        ctx: &ValidationContext<'_, S>,
        errors: &mut FormErrors,
    ) -> Result<(), AppError>
    where
        S: UserStore + ?Sized;

    /// Validate the submission
    async fn validate<S>(&self, ctx: &ValidationContext<'_, S>) -> Result<(), FormError>
    where
        S: UserStore + ?Sized,
    {
        let mut errors = FormErrors::new();

        if let Some(expected) = ctx.expected_csrf() {
            let mut chain = FieldChain::new(CSRF_FIELD);
            chain.record(verify_csrf(expected, self.csrf_token()));
            errors.push(chain);
        }

        if let Err(err) = self.check_fields(ctx, &mut errors).await {
            counter!(FORM_STORE_ERROR, "form" => Self::NAME).increment(1);
            tracing::warn!(form = Self::NAME, error = %err, "user store failed during validation");
            return Err(FormError::Store(err));
        }

        if errors.is_empty() {
            counter!(FORM_VALIDATED, "form" => Self::NAME).increment(1);
            tracing::debug!(form = Self::NAME, "form accepted");
            return Ok(());
        }

        for (field, messages) in errors.iter() {
            tracing::debug!(form = Self::NAME, field, ?messages, "field rejected");
        }
        counter!(FORM_REJECTED, "form" => Self::NAME).increment(1);
        Err(FormError::Invalid(errors))
    }
}

/// Required, then email shape
fn email_chain(value: &str, required_msg: &str, format_msg: &str) -> FieldChain {
    let mut chain = FieldChain::new("email");
    chain
        .run(|| required(value, required_msg))
        .run(|| email_format(value, format_msg));
    chain
}

/// A mandatory new password plus its confirmation
fn new_password_chains(
    errors: &mut FormErrors,
    password: &str,
    repeat: &str,
    policy: &PasswordPolicy,
) {
    let mut first = FieldChain::new("password");
    first
        .run(|| required(password, MSG_PASSWORD_REQUIRED))
        .run(|| valid_password(password, policy));
    errors.push(first);

    let mut second = FieldChain::new("password_repeat");
    second
        .run(|| required(repeat, MSG_REPEAT_REQUIRED))
        .run(|| password_repeat(repeat, password));
    errors.push(second);
}
