//! Record Store API Client
//!
//! The realtime store seam, its Firebase Realtime Database REST client, and
//! the two record-screen operations written against the seam.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::egui_app::auth::{provider_error, TokenSource};
use crate::egui_app::config::Config;
use crate::egui_app::push_id::PushIdGenerator;
use crate::shared::contact::NewContact;
use crate::shared::error::AppError;
use crate::shared::listing::{materialize, LoadedRecords};
use crate::shared::validation::validate_contact;

/// Hosted realtime store as seen by the app
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// A fresh key for a new record, `None` if none can be produced
    fn generate_key(&self) -> Option<String>;

    /// Store `contact` under `key`; the store stamps `createdAt`
    async fn write(&self, key: &str, contact: &NewContact) -> Result<(), AppError>;

    /// One-time read of the whole collection as raw JSON
    async fn read_all_once(&self) -> Result<Value, AppError>;
}

/// Validate the form, obtain a key and write the record under it.
///
/// Returns the key on success. Nothing is written when validation or key
/// generation fails.
pub async fn save_record(
    store: &dyn RecordStore,
    name: &str,
    email: &str,
    message: &str,
) -> Result<String, AppError> {
    let contact = validate_contact(name, email, message)?;
    save_contact(store, &contact).await
}

/// Obtain a key and write an already validated record under it
pub async fn save_contact(store: &dyn RecordStore, contact: &NewContact) -> Result<String, AppError> {
    let key = store.generate_key().ok_or(AppError::KeyGeneration)?;
    tracing::debug!("Writing record {}", key);

    store.write(&key, contact).await?;
    tracing::info!("Record {} saved", key);
    Ok(key)
}

/// Read every record once and order them newest first
pub async fn load_all_once(store: &dyn RecordStore) -> Result<LoadedRecords, AppError> {
    let snapshot = store.read_all_once().await?;
    let loaded = materialize(snapshot);
    if loaded.skipped > 0 {
        tracing::warn!("Skipped {} unreadable record(s)", loaded.skipped);
    }
    tracing::info!("Loaded {} record(s)", loaded.len());
    Ok(loaded)
}

/// Firebase Realtime Database REST client
pub struct RealtimeDbClient {
    config: Config,
    client: Client,
    tokens: Arc<dyn TokenSource>,
    keys: PushIdGenerator,
}

impl RealtimeDbClient {
    pub fn new(config: Config, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            config,
            client: Client::new(),
            tokens,
            keys: PushIdGenerator::new(),
        }
    }

    async fn auth_query(&self) -> Result<Vec<(&'static str, String)>, AppError> {
        Ok(self
            .tokens
            .id_token()
            .await?
            .map(|token| vec![("auth", token)])
            .unwrap_or_default())
    }
}

#[async_trait]
impl RecordStore for RealtimeDbClient {
    fn generate_key(&self) -> Option<String> {
        self.keys.generate()
    }

    async fn write(&self, key: &str, contact: &NewContact) -> Result<(), AppError> {
        let query = self.auth_query().await?;
        let response = self
            .client
            .put(self.config.record_url(key))
            .query(&query)
            .json(contact)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = provider_error(response).await;
            tracing::warn!("Write of {} failed: {}", key, error);
            return Err(error);
        }
        Ok(())
    }

    async fn read_all_once(&self) -> Result<Value, AppError> {
        let query = self.auth_query().await?;
        let response = self
            .client
            .get(self.config.records_url())
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = provider_error(response).await;
            tracing::warn!("Read of records failed: {}", error);
            return Err(error);
        }
        Ok(response.json().await?)
    }
}
