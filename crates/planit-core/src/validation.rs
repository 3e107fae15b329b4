//! Client-side input checks.
//!
//! Every check runs before a request is built, so a rejected input never
//! reaches the network. Lengths count characters, not bytes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub const MAX_USERNAME_CHARS: usize = 50;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

static DATE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap_or_else(|e| panic!("invalid date regex: {e}"))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingCredentials,
    UsernameTooLong,
    MissingRegistrationFields,
    RegistrationUsernameTooLong,
    PasswordTooShort,
    PasswordMismatch,
    MissingTaskTitle,
    MissingEventTitle,
    TitleTooLong,
    DescriptionTooLong,
    MissingDate,
    InvalidDateFormat,
    MissingSearchQuery,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationError::MissingCredentials => "Please enter both username and password",
            ValidationError::UsernameTooLong => "Username is too long",
            ValidationError::MissingRegistrationFields => "Please fill in all fields",
            ValidationError::RegistrationUsernameTooLong => {
                "Username must be 50 characters or less"
            }
            ValidationError::PasswordTooShort => "Password must be at least 6 characters",
            ValidationError::PasswordMismatch => "Passwords do not match",
            ValidationError::MissingTaskTitle => "Please enter a task title",
            ValidationError::MissingEventTitle => "Please enter an event title",
            ValidationError::TitleTooLong => "Title must be 200 characters or less",
            ValidationError::DescriptionTooLong => "Description must be 1000 characters or less",
            ValidationError::MissingDate => "Please enter a date",
            ValidationError::InvalidDateFormat => "Please enter date in YYYY-MM-DD format",
            ValidationError::MissingSearchQuery => "Please enter a search query",
        };
        f.write_str(message)
    }
}

impl std::error::Error for ValidationError {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Checks login input.
///
/// # Errors
/// Returns the first rule the input breaks.
pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    if is_blank(username) || is_blank(password) {
        return Err(ValidationError::MissingCredentials);
    }
    if char_len(username) > MAX_USERNAME_CHARS {
        return Err(ValidationError::UsernameTooLong);
    }
    Ok(())
}

/// Checks registration input.
///
/// # Errors
/// Returns the first rule the input breaks.
pub fn validate_registration(
    username: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if is_blank(username) || is_blank(password) {
        return Err(ValidationError::MissingRegistrationFields);
    }
    if char_len(username) > MAX_USERNAME_CHARS {
        return Err(ValidationError::RegistrationUsernameTooLong);
    }
    if char_len(password) < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Checks a new task.
///
/// # Errors
/// Returns the first rule the input breaks.
pub fn validate_task(title: &str, description: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        return Err(ValidationError::MissingTaskTitle);
    }
    if char_len(title) > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    if char_len(description) > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

/// Checks a new calendar event.
///
/// # Errors
/// Returns the first rule the input breaks.
pub fn validate_event(title: &str, date: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        return Err(ValidationError::MissingEventTitle);
    }
    if char_len(title) > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    if is_blank(date) {
        return Err(ValidationError::MissingDate);
    }
    if !DATE_FORMAT.is_match(date.trim()) {
        return Err(ValidationError::InvalidDateFormat);
    }
    Ok(())
}

/// Checks a search query.
///
/// # Errors
/// Returns [`ValidationError::MissingSearchQuery`] for blank input.
pub fn validate_search(query: &str) -> Result<(), ValidationError> {
    if is_blank(query) {
        return Err(ValidationError::MissingSearchQuery);
    }
    Ok(())
}
