//! Registration field rules
//!
//! Format checks for the fields a member signs up with. Uniqueness checks
//! need the store and live in the service layer.

use std::sync::LazyLock;

use regex::Regex;

pub const USERNAME_MIN_LENGTH: u64 = 3;
pub const USERNAME_MAX_LENGTH: u64 = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const USERNAME_REQUIRED: &str = "Username is mandatory";
pub const USERNAME_LENGTH: &str = "Username must be between 3 and 50 characters";
pub const FIRST_NAME_REQUIRED: &str = "First Name is mandatory";
pub const LAST_NAME_REQUIRED: &str = "Last Name is mandatory";
pub const EMAIL_REQUIRED: &str = "Email is mandatory";
pub const EMAIL_INVALID: &str = "Email should be valid";
pub const PHONE_REQUIRED: &str = "Phone number is mandatory";
pub const PHONE_INVALID: &str =
    "Phone number must be valid 10 digit indian number without country code";
pub const PASSWORD_RULES: &str = "Password must be at least 8 characters long and include at least one uppercase letter, one lowercase letter, one number, and one special character (@$!%*?&).";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.(com|net|org|edu|gov|mil|info|co|io|biz|in|us|uk|ca|au|de|fr|jp|cn|br|za|ru|eu|[a-zA-Z]{2,})$",
    )
    .expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6789]\d{9}$").expect("phone pattern is valid"));

const PASSWORD_SPECIALS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Email format check; consecutive dots anywhere are rejected
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

/// Ten digit Indian mobile number without country code
#[must_use]
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Password policy: at least 8 characters, with an uppercase letter, a
/// lowercase letter, a digit and one of `@$!%*?&`
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().any(|c| !c.is_whitespace())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.contains(PASSWORD_SPECIALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("a+b@mail.co.in"));
        assert!(is_valid_email("x_y@host.museum"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("jane..doe@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@example.c"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone_numbers() {
        assert!(is_valid_phone_number("9876543210"));
        assert!(is_valid_phone_number("6000000000"));
        assert!(!is_valid_phone_number("5876543210"));
        assert!(!is_valid_phone_number("987654321"));
        assert!(!is_valid_phone_number("+919876543210"));
    }

    #[test]
    fn test_password_policy() {
        assert!(is_strong_password("Secret@123"));
        assert!(!is_strong_password("Sec@1"));
        assert!(!is_strong_password("secret@123"));
        assert!(!is_strong_password("SECRET@123"));
        assert!(!is_strong_password("Secret@abc"));
        assert!(!is_strong_password("Secret1234"));
    }
}
