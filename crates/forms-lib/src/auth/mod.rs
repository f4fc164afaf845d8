// ============================
// authforms-lib/src/auth/mod.rs
// ============================
//! Credential checks used by the forms.

pub mod csrf;
pub mod password;

pub use csrf::{verify_csrf, CsrfToken, CSRF_FIELD};
pub use password::{
    hash_password, hash_password_secure, hash_password_with, verify_password, PasswordCheck,
};
