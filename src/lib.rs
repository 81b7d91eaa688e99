//! Contact Book - Main Library
//!
//! A two-screen desktop client: sign in against a hosted identity service,
//! then append contact records to a hosted realtime store and list them on
//! demand, newest first.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic types and logic
//!   - Contact record model and wire format
//!   - Validation rules, snapshot listing and ordering
//!   - Configuration and error types
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Identity and record store clients (Firebase REST, in-memory)
//!   - Session persistence and key generation
//!   - Screen state, async dispatch and views
//!
//! # Usage
//!
//! ```rust,no_run
//! use contact_book::egui_app::{AppState, Config};
//!
//! let config = Config::load().expect("valid configuration");
//! let state = AppState::from_config(config).expect("providers start");
//! ```
//!
//! # Thread Safety
//!
//! - **UI**: egui is single-threaded immediate mode; all screen state lives on
//!   the UI thread.
//! - **Network**: provider calls run on a tokio runtime owned by the app state
//!   and report back over channels polled every frame.
//!
//! # Error Handling
//!
//! Fallible operations return `Result<T, AppError>`; see `shared::error`.

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
