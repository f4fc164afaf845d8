//! Forms acting on an existing account.
use async_trait::async_trait;
use authforms_common::{FieldKind, FieldSpec, Role, User};
use serde::Deserialize;

use super::{email_chain, Form, CSRF_SPEC, MSG_NAME_REQUIRED};
use crate::error::AppError;
use crate::storage::UserStore;
use crate::validation::{
    current_password, email_not_in_use, one_of, password_repeat, required, valid_password,
    FieldChain, FormErrors,
};
use crate::ValidationContext;

pub const MSG_CURRENT_REQUIRED: &str = "current password cannot be empty";
pub const MSG_ACCOUNT_EMAIL_REQUIRED: &str = "email address is not filled in";
pub const MSG_ACCOUNT_EMAIL_INVALID: &str = "entered value is not a valid email address";
pub const MSG_ROLE_REQUIRED: &str = "Role is not filled in.";

const ACCOUNT_FIELDS: &[FieldSpec] = &[
    CSRF_SPEC,
    FieldSpec::new("current_password", "Current password", FieldKind::Password),
    FieldSpec::new("new_password", "New password", FieldKind::Password),
    FieldSpec::new("new_password_repeat", "Repeat new password", FieldKind::Password),
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("email", "Email", FieldKind::Email),
];

const DEACTIVATION_FIELDS: &[FieldSpec] = &[CSRF_SPEC];

const ROLE_CHANGE_FIELDS: &[FieldSpec] = &[
    CSRF_SPEC,
    FieldSpec::new("role", "Select a role", FieldKind::Select),
];

/// Edit the signed-in account.
///
/// The account itself comes from [`ValidationContext::with_user`]. The new
/// password pair is optional: leaving both boxes empty keeps the current
/// password and skips every new-password rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountForm {
    pub current_password: String,
    pub new_password: String,
    pub new_password_repeat: String,
    pub name: String,
    pub email: String,
    pub csrf_token: Option<String>,
}

impl AccountForm {
    /// Initial values for rendering the form for `user`
    pub fn prefilled(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    /// False when both new-password boxes were left empty
    pub fn changes_password(&self) -> bool {
        !(self.new_password.is_empty() && self.new_password_repeat.is_empty())
    }
}

#[async_trait]
impl Form for AccountForm {
    const NAME: &'static str = "account";
    const SUBMIT_LABEL: &'static str = "Update account";

    fn fields() -> &'static [FieldSpec] {
        ACCOUNT_FIELDS
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
        let mut current = FieldChain::new("current_password");
        current
            .run(|| required(&self.current_password, MSG_CURRENT_REQUIRED))
            .run(|| current_password(ctx.user, &self.current_password));
        errors.push(current);

        let changing = self.changes_password();
        let policy = ctx.password_policy();

        let mut new_password = FieldChain::new("new_password");
        if changing {
            new_password.run(|| valid_password(&self.new_password, &policy));
        }
        errors.push(new_password);

        let mut new_repeat = FieldChain::new("new_password_repeat");
        if changing {
            new_repeat.run(|| password_repeat(&self.new_password_repeat, &self.new_password));
        }
        errors.push(new_repeat);

        let mut name = FieldChain::new("name");
        name.run(|| required(&self.name, MSG_NAME_REQUIRED));
        errors.push(name);

        let mut email = email_chain(
            &self.email,
            MSG_ACCOUNT_EMAIL_REQUIRED,
            MSG_ACCOUNT_EMAIL_INVALID,
        );
        if !email.is_halted() {
            let owner = ctx.user.map(|user| user.id);
            email.record(email_not_in_use(ctx.store, &self.email, owner).await?);
        }
        errors.push(email);

        Ok(())
    }
}

/// Confirmation button for closing the signed-in account
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeactivationForm {
    pub csrf_token: Option<String>,
}

#[async_trait]
impl Form for DeactivationForm {
    const NAME: &'static str = "deactivation";
    const SUBMIT_LABEL: &'static str = "Deactivate account";

    fn fields() -> &'static [FieldSpec] {
        DEACTIVATION_FIELDS
    }

    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    async fn check_fields<S>(
        &self,
        _ctx: &ValidationContext<'_, S>,
        _errors: &mut FormErrors,
    ) -> Result<(), AppError>
    where
        S: UserStore + ?Sized,
    {
        Ok(())
    }
}

/// Pick a new role for an account among the roles the caller offers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoleChangeForm {
    pub role: String,
    pub csrf_token: Option<String>,
    #[serde(skip)]
    choices: Vec<Role>,
}

impl RoleChangeForm {
    /// Set the roles the submitted value must be one of
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Role>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    pub fn choices(&self) -> &[Role] {
        &self.choices
    }

    /// The chosen role, once validated
    pub fn selected(&self) -> Option<&Role> {
        self.choices.iter().find(|role| role.name == self.role)
    }
}

#[async_trait]
impl Form for RoleChangeForm {
    const NAME: &'static str = "role_change";
    const SUBMIT_LABEL: &'static str = "Change role";

    fn fields() -> &'static [FieldSpec] {
        ROLE_CHANGE_FIELDS
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
        let mut role = FieldChain::new("role");
        role.run(|| one_of(&self.role, &self.choices))
            .run(|| required(&self.role, MSG_ROLE_REQUIRED));
        errors.push(role);
        Ok(())
    }
}
