// ============================
// crates/forms-lib/src/validation/mod.rs
// ============================
//! Field validators and the per-field validation chain.
//!
//! A field runs its validators in declaration order through a [`FieldChain`].
//! An ordinary failure ([`ValidationError::Invalid`]) is recorded and the
//! chain moves on, so one field can collect several messages. A stopping
//! failure ([`ValidationError::Stop`], raised by [`required`]) wipes what the
//! field collected so far, records its own message and ends the chain.

use std::fmt;
use std::sync::LazyLock;

use authforms_common::{Role, User, UserId};
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::auth::PasswordCheck;
use crate::config::PasswordPolicy;
use crate::error::AppError;
use crate::storage::UserStore;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_LOCAL_PART_LENGTH: usize = 64;

// RFC 5322 dot-atom local part, dot-separated hostname labels (at least two).
// Letters and digits may be non-ASCII for internationalized addresses.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?",
        r"(\.[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?)+$",
    ))
    .expect("email regex is valid")
});

pub const MSG_PASSWORD_EMPTY: &str = "new password cannot be empty";
pub const MSG_PASSWORD_MISMATCH: &str = "The password needs to match the new password";
pub const MSG_NAME_TAKEN: &str = "There is already a user with this name";
pub const MSG_EMAIL_IN_USE: &str = "This address is already in use";
pub const MSG_NO_USER: &str = "User instance not passed to form validation";
pub const MSG_INVALID_PASSWORD: &str = "Invalid password";
pub const MSG_INVALID_CHOICE: &str = "Not a valid choice.";

/// A single failed check on one field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Recorded, remaining validators still run
    #[error("{0}")]
    Invalid(String),

    /// Replaces earlier messages for the field and ends its chain
    #[error("{0}")]
    Stop(String),
}

impl ValidationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationError::Invalid(message.into())
    }

    pub fn stop(message: impl Into<String>) -> Self {
        ValidationError::Stop(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::Invalid(msg) | ValidationError::Stop(msg) => msg,
        }
    }
}

/// Result type for validation operations
pub type ValidationResult = Result<(), ValidationError>;

/// Messages collected for one field while its validators run
#[derive(Debug, Clone)]
pub struct FieldChain {
    field: &'static str,
    messages: Vec<String>,
    halted: bool,
}

impl FieldChain {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            messages: Vec::new(),
            halted: false,
        }
    }

    /// True once a stopping validator failed; later validators are skipped
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Run a synchronous validator unless the chain already stopped
    pub fn run(&mut self, validator: impl FnOnce() -> ValidationResult) -> &mut Self {
        if !self.halted {
            self.record(validator());
        }
        self
    }

    /// Record the outcome of a validator that was evaluated by the caller
    pub fn record(&mut self, outcome: ValidationResult) {
        if self.halted {
            return;
        }
        match outcome {
            Ok(()) => {},
            Err(ValidationError::Invalid(msg)) => self.messages.push(msg),
            Err(ValidationError::Stop(msg)) => {
                self.messages.clear();
                self.messages.push(msg);
                self.halted = true;
            },
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Per-field messages for a whole form, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: Vec<(&'static str, Vec<String>)>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished chain in; chains without messages are dropped
    pub fn push(&mut self, chain: FieldChain) {
        if chain.messages.is_empty() {
            return;
        }
        match self.fields.iter_mut().find(|(name, _)| *name == chain.field) {
            Some((_, messages)) => messages.extend(chain.messages),
            None => self.fields.push((chain.field, chain.messages)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields carrying at least one message
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> + '_ {
        self.fields
            .iter()
            .map(|(name, messages)| (*name, messages.as_slice()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, messages)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl Serialize for FormErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, messages) in &self.fields {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Fail on empty or whitespace-only input, stopping the field's chain
pub fn required(value: &str, message: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::stop(message));
    }
    Ok(())
}

/// Validate an email address shape
pub fn email_format(value: &str, message: &str) -> ValidationResult {
    let local_len = value.rsplit_once('@').map_or(0, |(local, _)| local.chars().count());
    if value.chars().count() > MAX_EMAIL_LENGTH
        || local_len > MAX_LOCAL_PART_LENGTH
        || !EMAIL_REGEX.is_match(value)
    {
        return Err(ValidationError::invalid(message));
    }
    Ok(())
}

/// Validate a password against the configured length bounds
pub fn valid_password(password: &str, policy: &PasswordPolicy) -> ValidationResult {
    // Length is counted in characters, not bytes
    let size = password.chars().count();
    if size == 0 {
        return Err(ValidationError::invalid(MSG_PASSWORD_EMPTY));
    }

    if size < policy.min_length || size > policy.max_length {
        return Err(ValidationError::invalid(format!(
            "Password needs to be between {} and {} characters long (you entered {size})",
            policy.min_length, policy.max_length
        )));
    }

    Ok(())
}

/// Validate that a repeated password equals the original one
pub fn password_repeat(repeat: &str, password: &str) -> ValidationResult {
    if repeat != password {
        return Err(ValidationError::invalid(MSG_PASSWORD_MISMATCH));
    }
    Ok(())
}

/// Validate that a select value is one of the offered roles
pub fn one_of(value: &str, choices: &[Role]) -> ValidationResult {
    if !choices.iter().any(|role| role.name == value) {
        return Err(ValidationError::invalid(MSG_INVALID_CHOICE));
    }
    Ok(())
}

/// Validate a current password against the associated account's hash
pub fn current_password(user: Option<&User>, candidate: &str) -> ValidationResult {
    let Some(user) = user else {
        return Err(ValidationError::invalid(MSG_NO_USER));
    };

    if !user.is_password_valid(candidate) {
        return Err(ValidationError::invalid(MSG_INVALID_PASSWORD));
    }

    Ok(())
}

/// Check that no account already uses this name
pub async fn unique_username<S>(store: &S, name: &str) -> Result<ValidationResult, AppError>
where
    S: UserStore + ?Sized,
{
    if store.find_by_name(name).await?.is_some() {
        return Ok(Err(ValidationError::invalid(MSG_NAME_TAKEN)));
    }
    Ok(Ok(()))
}

/// Check that no other account uses this email address.
///
/// `owner` is the id of the account being edited, its own address is allowed.
/// Empty input is skipped.
pub async fn email_not_in_use<S>(
    store: &S,
    email: &str,
    owner: Option<UserId>,
) -> Result<ValidationResult, AppError>
where
    S: UserStore + ?Sized,
{
    if email.is_empty() {
        return Ok(Ok(()));
    }

    match store.find_by_email(email).await? {
        Some(existing) if Some(existing.id) != owner => {
            Ok(Err(ValidationError::invalid(MSG_EMAIL_IN_USE)))
        },
        _ => Ok(Ok(())),
    }
}
