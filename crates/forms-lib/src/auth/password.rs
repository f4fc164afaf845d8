// ============================
// authforms-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use argon2::Argon2;
use authforms_common::User;
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Params, Scrypt,
};
use zeroize::Zeroize;

/// Verification of a candidate password against an account's stored hash
pub trait PasswordCheck {
    fn is_password_valid(&self, candidate: &str) -> bool;
}

impl PasswordCheck for User {
    fn is_password_valid(&self, candidate: &str) -> bool {
        verify_password(&self.password_hash, candidate)
    }
}

/// Hash a password using scrypt
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Hash a password using scrypt with explicit cost parameters
pub fn hash_password_with(plain: &str, params: Params) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a PHC hash produced by scrypt or argon2
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    parsed_hash
        .verify_password(&[&Argon2::default(), &Scrypt], plain)
        .is_ok()
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_password(plain)?;
    plain.zeroize();
    Ok(hash)
}
