use regex::Regex;
use std::sync::LazyLock;

use crate::applicant::ContactPreference;

// No whitespace, exactly one "@", at least one dot in the domain part.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Digits plus the usual formatting characters; digit count is checked separately.
static PHONE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("valid phone pattern"));

const MIN_PHONE_DIGITS: usize = 10;

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    if !PHONE_CHARS_RE.is_match(value) {
        return false;
    }
    value.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

/// Validation failure for a form submission. The display string is the single
/// user-visible error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your {0}")]
    MissingContactInfo(ContactPreference),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Caller-side validation run before a Create is attempted. Inputs are
/// checked after trimming; the stored values are trimmed by the caller.
pub fn validate_submission(
    name: &str,
    preference: ContactPreference,
    contact_info: &str,
) -> Result<(), SubmissionError> {
    if name.trim().is_empty() {
        return Err(SubmissionError::MissingName);
    }

    let contact_info = contact_info.trim();
    if contact_info.is_empty() {
        return Err(SubmissionError::MissingContactInfo(preference));
    }

    match preference {
        ContactPreference::Email if !is_valid_email(contact_info) => {
            Err(SubmissionError::InvalidEmail)
        }
        ContactPreference::Phone if !is_valid_phone(contact_info) => {
            Err(SubmissionError::InvalidPhone)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("jane.doe+jobs@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("plainstring"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn accepts_formatted_phone() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("5551234567"));
    }

    #[test]
    fn rejects_short_or_lettered_phone() {
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn submission_requires_name_then_contact() {
        assert_eq!(
            validate_submission("  ", ContactPreference::Email, "a@b.com"),
            Err(SubmissionError::MissingName)
        );
        assert_eq!(
            validate_submission("Jane", ContactPreference::Phone, "   "),
            Err(SubmissionError::MissingContactInfo(ContactPreference::Phone))
        );
        assert_eq!(
            validate_submission("Jane", ContactPreference::Email, "a@b"),
            Err(SubmissionError::InvalidEmail)
        );
        assert!(validate_submission("Jane", ContactPreference::Email, "a@b.com").is_ok());
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            SubmissionError::MissingContactInfo(ContactPreference::Email).to_string(),
            "Please enter your email"
        );
        assert_eq!(
            SubmissionError::InvalidPhone.to_string(),
            "Please enter a valid phone number"
        );
    }
}
