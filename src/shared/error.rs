//! Shared Error Types
//!
//! Every failure the application can surface to the user is an [`AppError`].
//!
//! # Error Categories
//!
//! - `Validation` - A form field failed client-side checks (no network call made)
//! - `KeyGeneration` - The store could not hand out a key for a new record
//! - `Provider` - The identity service or the realtime store reported a failure
//! - `Config` - Startup configuration is unusable
//!
//! # Usage
//!
//! ```rust
//! use contact_book::shared::error::{AppError, Field};
//!
//! let error = AppError::validation(Field::Name, "Required");
//! assert_eq!(error.field(), Some(Field::Name));
//! ```
use std::fmt;

use thiserror::Error;

use crate::shared::config::ConfigError;

/// Form fields that can carry an inline validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Message => write!(f, "message"),
            Field::Password => write!(f, "password"),
        }
    }
}

/// Application error taxonomy
#[derive(Debug, Error, Clone)]
pub enum AppError {
    /// Client-side validation failure on a single field
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The offending field
        field: Field,
        /// Text shown next to the field
        message: String,
    },

    /// The store returned no key for a new record
    #[error("Could not generate ID")]
    KeyGeneration,

    /// Failure reported by the identity service or the realtime store
    #[error("{message}")]
    Provider {
        /// Provider message, passed through verbatim
        message: String,
    },

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Create a new validation error
    pub fn validation(field: Field, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// The field a validation error belongs to
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Text suitable for a notification, without the variant prefix
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// The request URL is stripped: it carries the API key or the id token.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::provider(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::provider(format!("Malformed response: {}", err))
    }
}
