use authforms_lib::config::PasswordPolicy;
use authforms_lib::validation::{password_repeat, valid_password, ValidationError};

fn policy() -> PasswordPolicy {
    PasswordPolicy {
        min_length: 8,
        max_length: 16,
    }
}

#[test]
fn test_every_length_outside_the_window_fails() {
    for len in (1..8).chain(17..40) {
        let password = "p".repeat(len);
        let err = valid_password(&password, &policy()).unwrap_err();
        assert_eq!(
            err.message(),
            format!("Password needs to be between 8 and 16 characters long (you entered {len})")
        );
    }
}

#[test]
fn test_every_length_inside_the_window_passes() {
    for len in 8..=16 {
        assert!(valid_password(&"p".repeat(len), &policy()).is_ok());
    }
}

#[test]
fn test_empty_password_has_its_own_message() {
    assert_eq!(
        valid_password("", &policy()),
        Err(ValidationError::invalid("new password cannot be empty"))
    );
}

#[test]
fn test_repeat_must_match_exactly() {
    let pairs = [
        ("password1", "password1", true),
        ("password1", "Password1", false),
        ("password1", "password1 ", false),
        ("", "password1", false),
    ];
    for (password, repeat, ok) in pairs {
        assert_eq!(password_repeat(repeat, password).is_ok(), ok, "{password:?} vs {repeat:?}");
    }
}
