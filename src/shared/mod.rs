//! Shared Module
//!
//! Platform-agnostic types and logic: the contact record model, form
//! validation, snapshot listing, configuration and the error taxonomy.
//! Nothing in here touches the network or the UI.

/// Contact record data structures
pub mod contact;

/// Shared error types
pub mod error;

/// Snapshot materialization and ordering
pub mod listing;

/// Form validation rules
pub mod validation;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use contact::{ContactRecord, NewContact, ServerTimestamp};
pub use error::{AppError, Field};
pub use listing::{materialize, sort_newest_first, LoadedRecords};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ProviderKind};
