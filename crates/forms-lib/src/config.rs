// ============================
// authforms-lib/src/config.rs
// ============================
//! Configuration management.
use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Environment variable prefix, e.g. `AUTHFORMS_MIN_PWD_LEN`
pub const ENV_PREFIX: &str = "AUTHFORMS_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level: one of trace, debug, info, warn or error
    pub log_level: String,
    /// Minimum password length in characters
    pub min_pwd_len: usize,
    /// Maximum password length in characters
    pub max_pwd_len: usize,
    /// Check anti-forgery tokens on submitted forms
    pub csrf_enabled: bool,
}

/// Password length bounds applied by the password validators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            min_pwd_len: 10,
            max_pwd_len: 500,
            csrf_enabled: true,
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Settings::default().password_policy()
    }
}

impl Settings {
    /// Load settings from the default config files and the environment
    pub fn load() -> Result<Self, AppError> {
        Self::extract(
            Self::base()
                .merge(Toml::file("config.toml"))
                .merge(Yaml::file("config.yaml"))
                .merge(Json::file("config.json"))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Load settings from an explicit file, environment still wins
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::base().merge(Yaml::file(path)),
            Some("json") => Self::base().merge(Json::file(path)),
            _ => Self::base().merge(Toml::file(path)),
        };
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
    }

    fn extract(figment: Figment) -> Result<Self, AppError> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the validators cannot work with
    pub fn validate(&self) -> Result<(), AppError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        if self.min_pwd_len == 0 {
            return Err(AppError::Config(
                "min_pwd_len must be at least 1".to_string(),
            ));
        }

        if self.min_pwd_len > self.max_pwd_len {
            return Err(AppError::Config(format!(
                "min_pwd_len ({}) exceeds max_pwd_len ({})",
                self.min_pwd_len, self.max_pwd_len
            )));
        }

        Ok(())
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.min_pwd_len,
            max_length: self.max_pwd_len,
        }
    }
}
