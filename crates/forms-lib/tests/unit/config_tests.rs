// ==========================
// tests/unit/config_tests.rs
// ==========================
//! Unit tests for the configuration module
use authforms_lib::config::{PasswordPolicy, Settings};
use authforms_lib::AppError;

#[test]
fn test_settings_custom() {
    let settings = Settings {
        log_level: "debug".to_string(),
        min_pwd_len: 12,
        max_pwd_len: 128,
        csrf_enabled: false,
    };

    assert!(settings.validate().is_ok());
    assert_eq!(
        settings.password_policy(),
        PasswordPolicy {
            min_length: 12,
            max_length: 128,
        }
    );
}

#[test]
fn test_password_policy_default_matches_settings_default() {
    assert_eq!(PasswordPolicy::default(), Settings::default().password_policy());
}

#[test]
fn test_log_level_is_case_insensitive() {
    let settings = Settings {
        log_level: "WARN".to_string(),
        ..Settings::default()
    };
    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings.min_pwd_len, Settings::default().min_pwd_len);
    assert_eq!(settings.max_pwd_len, Settings::default().max_pwd_len);
}

#[test]
fn test_yaml_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("authforms.yaml");
    std::fs::write(&path, "log_level: error\nmax_pwd_len: 40\n").unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.log_level, "error");
    assert_eq!(settings.max_pwd_len, 40);
}

#[test]
fn test_bad_log_level_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("authforms.toml");
    std::fs::write(&path, "log_level = \"chatty\"\n").unwrap();

    assert!(matches!(Settings::load_from(&path), Err(AppError::Config(_))));
}
