//! Validate one JSON submission and describe the outcome.
use authforms_common::{FieldSpec, Role};
use authforms_lib::forms::{
    AccountForm, CompleteResetForm, CompleteSignupForm, DeactivationForm, LoginForm,
    RoleChangeForm, ResetForm, SignupForm,
};
use authforms_lib::storage::UserStore;
use authforms_lib::{Form, FormError, FormErrors, ValidationContext};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Forms the checker knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormKind {
    Login,
    Signup,
    Deactivation,
    RoleChange,
    CompleteSignup,
    Account,
    Reset,
    CompleteReset,
}

/// What gets printed for `authforms check`
#[derive(Debug, Serialize)]
pub struct Report {
    pub form: &'static str,
    pub valid: bool,
    pub errors: FormErrors,
}

/// What gets printed for `authforms fields`
#[derive(Debug, Serialize)]
pub struct Layout {
    pub form: &'static str,
    pub submit: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormKind {
    pub fn layout(self) -> Layout {
        match self {
            FormKind::Login => layout_of::<LoginForm>(),
            FormKind::Signup => layout_of::<SignupForm>(),
            FormKind::Deactivation => layout_of::<DeactivationForm>(),
            FormKind::RoleChange => layout_of::<RoleChangeForm>(),
            FormKind::CompleteSignup => layout_of::<CompleteSignupForm>(),
            FormKind::Account => layout_of::<AccountForm>(),
            FormKind::Reset => layout_of::<ResetForm>(),
            FormKind::CompleteReset => layout_of::<CompleteResetForm>(),
        }
    }

    /// Deserialize `input` as this form and validate it.
    ///
    /// `roles` only matters for the role-change form. Store failures are
    /// returned as errors, user-input failures end up in the report.
    pub async fn check<S>(
        self,
        input: serde_json::Value,
        ctx: &ValidationContext<'_, S>,
        roles: &[Role],
    ) -> anyhow::Result<Report>
    where
        S: UserStore + ?Sized,
    {
        match self {
            FormKind::Login => check_as::<LoginForm, S>(input, ctx).await,
            FormKind::Signup => check_as::<SignupForm, S>(input, ctx).await,
            FormKind::Deactivation => check_as::<DeactivationForm, S>(input, ctx).await,
            FormKind::RoleChange => {
                let form: RoleChangeForm = serde_json::from_value(input)?;
                let form = form.with_choices(roles.iter().cloned());
                report(&form, ctx).await
            },
            FormKind::CompleteSignup => check_as::<CompleteSignupForm, S>(input, ctx).await,
            FormKind::Account => check_as::<AccountForm, S>(input, ctx).await,
            FormKind::Reset => check_as::<ResetForm, S>(input, ctx).await,
            FormKind::CompleteReset => check_as::<CompleteResetForm, S>(input, ctx).await,
        }
    }
}

fn layout_of<F: Form>() -> Layout {
    Layout {
        form: F::NAME,
        submit: F::SUBMIT_LABEL,
        fields: F::fields(),
    }
}

async fn check_as<F, S>(
    input: serde_json::Value,
    ctx: &ValidationContext<'_, S>,
) -> anyhow::Result<Report>
where
    F: Form + DeserializeOwned,
    S: UserStore + ?Sized,
{
    let form: F = serde_json::from_value(input)?;
    report(&form, ctx).await
}

async fn report<F, S>(form: &F, ctx: &ValidationContext<'_, S>) -> anyhow::Result<Report>
where
    F: Form,
    S: UserStore + ?Sized,
{
    match form.validate(ctx).await {
        Ok(()) => Ok(Report {
            form: F::NAME,
            valid: true,
            errors: FormErrors::new(),
        }),
        Err(FormError::Invalid(errors)) => Ok(Report {
            form: F::NAME,
            valid: false,
            errors,
        }),
        Err(FormError::Store(err)) => Err(err.into()),
    }
}
