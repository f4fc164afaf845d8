// ============================
// authforms-lib/src/lib.rs
// ============================
//! Authentication and account forms with their field validators.

pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod metrics;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use authforms_common::User;

use crate::auth::CsrfToken;
use crate::config::{PasswordPolicy, Settings};
use crate::storage::UserStore;

pub use crate::error::{AppError, FormError};
pub use crate::forms::Form;
pub use crate::validation::{FormErrors, ValidationError};

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState<S> {
    /// Settings manager
    pub settings: Arc<Settings>,
    /// Account lookups
    pub store: S,
}

impl<S: UserStore> AppState<S> {
    /// Create a new application state
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            store,
        }
    }

    /// Start a validation context for one request
    pub fn context(&self) -> ValidationContext<'_, S> {
        ValidationContext::new(&self.settings, &self.store)
    }
}

/// Everything a form needs besides its own submitted values
pub struct ValidationContext<'a, S: ?Sized> {
    pub settings: &'a Settings,
    pub store: &'a S,
    /// The account the form acts on, if any
    pub user: Option<&'a User>,
    /// Token issued when the form was rendered
    pub csrf: Option<&'a CsrfToken>,
}

impl<'a, S: UserStore + ?Sized> ValidationContext<'a, S> {
    pub fn new(settings: &'a Settings, store: &'a S) -> Self {
        Self {
            settings,
            store,
            user: None,
            csrf: None,
        }
    }

    pub fn with_user(mut self, user: &'a User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_csrf(mut self, token: &'a CsrfToken) -> Self {
        self.csrf = Some(token);
        self
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        self.settings.password_policy()
    }

    /// Expected token, when anti-forgery checks are switched on
    pub fn expected_csrf(&self) -> Option<&'a CsrfToken> {
        if self.settings.csrf_enabled {
            self.csrf
        } else {
            None
        }
    }
}
