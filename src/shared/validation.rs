//! Form validation
//!
//! Credential checks report every failing field at once so the sign-in form
//! can mark both inputs in one pass. Record checks stop at the first failing
//! field.

use std::sync::LazyLock;

use regex::Regex;

use crate::shared::contact::NewContact;
use crate::shared::error::{AppError, Field};

/// Shortest password the identity service accepts
pub const MIN_PASSWORD_LEN: usize = 6;

pub const MSG_INVALID_EMAIL: &str = "Invalid email";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Minimum 6 characters";
pub const MSG_REQUIRED: &str = "Required";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern compiles")
});

/// Whether the whole input is an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Per-field outcome of credential validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl CredentialErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Check an email/password pair, reporting both fields independently
pub fn validate_credentials(email: &str, password: &str) -> Result<(), CredentialErrors> {
    let mut errors = CredentialErrors::default();

    if !is_valid_email(email) {
        errors.email = Some(MSG_INVALID_EMAIL);
    }
    // Length in UTF-16 code units, as the identity service's clients count it
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        errors.password = Some(MSG_PASSWORD_TOO_SHORT);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a record form and build the record to write.
///
/// Inputs are trimmed first. The first failing field, in form order, is
/// returned.
pub fn validate_contact(name: &str, email: &str, message: &str) -> Result<NewContact, AppError> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();

    if name.is_empty() {
        return Err(AppError::validation(Field::Name, MSG_REQUIRED));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation(Field::Email, MSG_INVALID_EMAIL));
    }
    if message.is_empty() {
        return Err(AppError::validation(Field::Message, MSG_REQUIRED));
    }

    Ok(NewContact::new(name, email, message))
}
