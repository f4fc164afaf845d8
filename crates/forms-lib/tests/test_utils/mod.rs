//! Test utilities for the form validation tests
//!
//! Builds application state around seeded user stores so each test starts
//! from the same two accounts.

#![allow(dead_code)]

use authforms_common::User;
use authforms_lib::{
    auth::hash_password_with,
    config::Settings,
    storage::{FlatFileUserStore, MemoryUserStore},
    AppState,
};
use scrypt::Params;
use tempfile::TempDir;

pub const ALICE_PASSWORD: &str = "alice-password";
pub const BOB_PASSWORD: &str = "bob-password";

/// Hash with low scrypt cost so the suite stays fast
pub fn cheap_hash(plain: &str) -> String {
    let params = Params::new(4, 8, 1, Params::RECOMMENDED_LEN).unwrap();
    hash_password_with(plain, params).unwrap()
}

pub fn alice() -> User {
    User::new(1, "alice", "alice@example.com", cheap_hash(ALICE_PASSWORD))
}

pub fn bob() -> User {
    User::new(2, "bob", "bob@example.com", cheap_hash(BOB_PASSWORD))
}

/// Settings with an 8..=64 password window and CSRF checks on
pub fn test_settings() -> Settings {
    Settings {
        min_pwd_len: 8,
        max_pwd_len: 64,
        ..Settings::default()
    }
}

/// State over an in-memory store holding alice and bob
pub fn memory_state() -> AppState<MemoryUserStore> {
    let store = MemoryUserStore::from_iter([alice(), bob()]);
    AppState::new(store, test_settings())
}

/// Sets up state over a flat-file store in a temporary directory
///
/// # Returns
///
/// The state and the temporary directory (keep it in scope to prevent cleanup
/// during the test)
pub async fn flat_file_state() -> (AppState<FlatFileUserStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FlatFileUserStore::new(temp_dir.path().join("users.json")).unwrap();
    store.write_all(&[alice(), bob()]).await.unwrap();

    (AppState::new(store, test_settings()), temp_dir)
}
