//! Common test utilities and helpers
//!
//! - Mock Firebase endpoints (wiremock)
//! - Session fixtures
//! - Driving `AppState` until its background work settles

#![allow(dead_code)]

pub mod auth_helpers;
pub mod mock_server;

pub use auth_helpers::*;
pub use mock_server::*;

use std::sync::Arc;
use std::time::{Duration, Instant};

use contact_book::egui_app::memory::{MemoryIdentity, MemoryStore};
use contact_book::egui_app::session_store::SessionStore;
use contact_book::egui_app::{AppState, Config};

/// App state over in-memory providers, with handles to both providers
pub struct MemoryApp {
    pub state: AppState,
    pub identity: Arc<MemoryIdentity>,
    pub store: Arc<MemoryStore>,
    pub sessions: SessionStore,
}

impl MemoryApp {
    pub fn new() -> Self {
        Self::with_sessions(SessionStore::in_memory())
    }

    pub fn with_sessions(sessions: SessionStore) -> Self {
        let identity = Arc::new(MemoryIdentity::new(sessions.clone()));
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(Config::memory(), identity.clone(), store.clone())
            .expect("app state starts");
        Self {
            state,
            identity,
            store,
            sessions,
        }
    }

    /// Poll until no dispatched task is outstanding
    pub fn settle(&mut self) {
        settle(&mut self.state);
    }
}

/// Poll `state` until no dispatched task is outstanding
pub fn settle(state: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        state.poll();
        if !state.has_pending() {
            return;
        }
        assert!(Instant::now() < deadline, "background work did not settle");
        std::thread::sleep(Duration::from_millis(5));
    }
}
