// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the form validators and whatever renders or persists them.
//! This module defines the account data model and the field descriptors
//! handed to form renderers.

use serde::{Deserialize, Serialize};

/// Identifier of a stored user account
pub type UserId = i64;

/// A user account as persisted by the data-access layer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Primary key
    pub id: UserId,
    /// Display name, unique across accounts
    pub name: String,
    /// Login address, unique across accounts
    pub email: String,
    /// PHC-format password hash (`$scrypt$...` or `$argon2id$...`)
    pub password_hash: String,
}

impl User {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Authorization category assignable to a user account
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Role {
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// How a renderer should present a form field
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text input
    Text,
    /// Email address input
    Email,
    /// Masked password input
    Password,
    /// Drop-down choice among caller supplied options
    Select,
    /// Hidden anti-forgery token
    Hidden,
}

/// Static description of one form field
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name of the submitted parameter
    pub name: &'static str,
    /// Human readable label
    pub label: &'static str,
    /// Input type
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}
