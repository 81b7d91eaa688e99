//! egui Native Desktop App Module
//!
//! The two-screen contact book client: an authentication screen and a record
//! screen, backed by an identity provider and a record store.
//!
//! # Architecture
//!
//! - **`config`** - Resolved configuration and provider endpoints
//! - **`types`** - Screens, session and navigation stack
//! - **`auth`** - Identity provider seam and Firebase Authentication client
//! - **`records_api`** - Record store seam, Realtime Database client, save/load
//! - **`session_store`** - On-disk session persistence
//! - **`push_id`** - Time-ordered record keys
//! - **`memory`** - In-process providers
//! - **`notifications`** - Transient toasts
//! - **`state`** - Screen state, async dispatch and result polling
//! - **`views`** / **`theme`** - Rendering
//! - **`main`** - Application entry point (binary)
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs           - Module exports and documentation
//! ├── main.rs          - Application entry point
//! ├── config.rs        - Configuration
//! ├── types.rs         - Shared types
//! ├── auth.rs          - Identity provider
//! ├── records_api.rs   - Record store
//! ├── session_store.rs - Session persistence
//! ├── push_id.rs       - Key generation
//! ├── memory.rs        - In-process providers
//! ├── notifications.rs - Toast queue
//! ├── state/           - AppState, AuthScreen, RecordScreen
//! ├── theme/           - Colors and global style
//! └── views/           - egui rendering
//! ```

pub mod config;
pub mod auth;
pub mod types;
pub mod records_api;
pub mod session_store;
pub mod push_id;
pub mod memory;
pub mod notifications;
pub mod state;
pub mod views;
pub mod theme;

// Re-export commonly used types
pub use config::Config;
pub use auth::{IdentityProvider, TokenSource};
pub use records_api::{load_all_once, save_record, RecordStore};
pub use types::{AppView, Navigator, Session};
pub use state::AppState;
