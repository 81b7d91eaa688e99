/**
 * Authentication Module
 *
 * The identity provider seam and its Firebase Authentication REST client.
 * Account creation and sign-in return the new session; failures carry the
 * provider's message unchanged.
 */

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::egui_app::config::Config;
use crate::egui_app::session_store::{SessionStore, StoredSession};
use crate::egui_app::types::Session;
use crate::shared::error::AppError;

/// Lifetime assumed when the service omits or garbles `expiresIn`
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Hosted identity service as seen by the app
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The locally known session, without any network round trip
    fn current_session(&self) -> Option<Session>;

    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AppError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;

    fn sign_out(&self);
}

/// Source of the bearer token attached to store requests
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// `Ok(None)` when nobody is signed in
    async fn id_token(&self) -> Result<Option<String>, AppError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    user_id: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

/// Error envelopes of both services: `{"error": {"message": ..}}` from the
/// identity service, `{"error": "..."}` from the database.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured { message: String },
    Text(String),
}

/// Turn an unsuccessful response into a provider error
pub(crate) async fn provider_error(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope {
            error: ErrorDetail::Structured { message },
        })
        | Ok(ErrorEnvelope {
            error: ErrorDetail::Text(message),
        }) => AppError::provider(message),
        Err(_) if body.trim().is_empty() => AppError::provider(status.to_string()),
        Err(_) => AppError::provider(format!("{}: {}", status, body.trim())),
    }
}

fn expiry_from(expires_in: Option<&str>) -> chrono::DateTime<Utc> {
    let now = Utc::now();
    expires_in
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or_else(|| now + Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS))
}

/// Firebase Authentication REST client
pub struct FirebaseAuthClient {
    config: Config,
    client: Client,
    sessions: SessionStore,
}

impl FirebaseAuthClient {
    pub fn new(config: Config, sessions: SessionStore) -> Self {
        Self {
            config,
            client: Client::new(),
            sessions,
        }
    }

    async fn password_call(
        &self,
        url: String,
        email: &str,
        password: &str,
    ) -> Result<Session, AppError> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let body: PasswordResponse = response.json().await?;
        let stored = StoredSession {
            uid: body.local_id,
            email: body.email.or_else(|| Some(email.to_string())),
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: expiry_from(body.expires_in.as_deref()),
        };
        let session = stored.session();
        self.sessions.set(stored);
        Ok(session)
    }

    async fn refresh(&self, stored: &StoredSession) -> Result<StoredSession, AppError> {
        tracing::debug!("Refreshing id token for {}", stored.uid);

        let response = self
            .client
            .post(self.config.refresh_url())
            .query(&[("key", self.config.api_key())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", stored.refresh_token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let body: RefreshResponse = response.json().await?;
        Ok(StoredSession {
            uid: body.user_id,
            email: stored.email.clone(),
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: expiry_from(body.expires_in.as_deref()),
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    fn current_session(&self) -> Option<Session> {
        self.sessions.get().map(|stored| stored.session())
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let session = self
            .password_call(self.config.sign_up_url(), email, password)
            .await?;
        tracing::info!("Account created for {}", session.uid);
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let session = self
            .password_call(self.config.sign_in_url(), email, password)
            .await?;
        tracing::info!("Signed in as {}", session.uid);
        Ok(session)
    }

    fn sign_out(&self) {
        self.sessions.clear();
        tracing::info!("Signed out");
    }
}

#[async_trait]
impl TokenSource for FirebaseAuthClient {
    async fn id_token(&self) -> Result<Option<String>, AppError> {
        let Some(stored) = self.sessions.get() else {
            return Ok(None);
        };

        if !stored.needs_refresh(Utc::now()) {
            return Ok(Some(stored.id_token));
        }

        match self.refresh(&stored).await {
            Ok(refreshed) => {
                let token = refreshed.id_token.clone();
                self.sessions.set(refreshed);
                Ok(Some(token))
            }
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                Err(e)
            }
        }
    }
}
