//! Session fixtures

use async_trait::async_trait;
use chrono::{Duration, Utc};
use contact_book::egui_app::session_store::StoredSession;
use contact_book::egui_app::TokenSource;
use contact_book::shared::AppError;

pub const TEST_EMAIL: &str = "ana@x.com";
pub const TEST_PASSWORD: &str = "secret1";

/// A session that is valid for another hour
pub fn fresh_session() -> StoredSession {
    StoredSession {
        uid: "uid-ana".to_string(),
        email: Some(TEST_EMAIL.to_string()),
        id_token: "id-token-1".to_string(),
        refresh_token: "refresh-token-1".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

/// A session whose id token has already expired
pub fn expired_session() -> StoredSession {
    StoredSession {
        expires_at: Utc::now() - Duration::minutes(5),
        ..fresh_session()
    }
}

/// Token source returning a fixed token
pub struct StaticToken(pub Option<String>);

#[async_trait]
impl TokenSource for StaticToken {
    async fn id_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.0.clone())
    }
}
