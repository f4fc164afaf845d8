// ============================
// crates/forms-lib/src/auth/csrf.rs
// ============================
//! Anti-forgery tokens for submitted forms.
//!
//! The caller issues a token when rendering a form, keeps the expected value
//! (usually in the session) and hands it back to validation. The submitted
//! copy travels in the `csrf_token` field.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::validation::{ValidationError, ValidationResult};

/// Default token size in bytes (32 bytes = 256 bits of entropy)
const DEFAULT_TOKEN_BYTES: usize = 32;

/// Name of the hidden field carrying the submitted token
pub const CSRF_FIELD: &str = "csrf_token";

pub const MSG_CSRF_MISSING: &str = "The CSRF token is missing.";
pub const MSG_CSRF_INVALID: &str = "The CSRF token is invalid.";

/// An issued anti-forgery token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /** Generate a fresh token from a cryptographically secure source
    # Returns
    A token whose text is base64 URL-safe encoded without padding */
    pub fn generate() -> Self {
        Self(generate_secure_token_with_size(DEFAULT_TOKEN_BYTES))
    }

    /// Wrap a token previously issued and stored by the caller
    pub fn from_issued(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare a submitted token without leaking the match position
    pub fn matches(&self, submitted: &str) -> bool {
        self.0.as_bytes().ct_eq(submitted.as_bytes()).into()
    }
}

/** Generate a cryptographically secure random token with specified size
# Arguments
* `bytes` - The size of the random token in bytes */
pub fn generate_secure_token_with_size(bytes: usize) -> String {
    let mut buffer = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}

/// Check a submitted token against the expected one
pub fn verify_csrf(expected: &CsrfToken, submitted: Option<&str>) -> ValidationResult {
    match submitted {
        None | Some("") => Err(ValidationError::invalid(MSG_CSRF_MISSING)),
        Some(token) if expected.matches(token) => Ok(()),
        Some(_) => Err(ValidationError::invalid(MSG_CSRF_INVALID)),
    }
}
