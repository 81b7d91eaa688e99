//! In-process providers
//!
//! [`MemoryIdentity`] and [`MemoryStore`] stand in for the hosted services
//! when the app runs with `provider = "memory"`, and back the flow tests.
//! They mirror the hosted behavior the app relies on: error messages in the
//! identity service's style, server-side timestamps that never go backwards,
//! and time-ordered keys. Failures can be injected per operation.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::egui_app::auth::{IdentityProvider, TokenSource};
use crate::egui_app::push_id::PushIdGenerator;
use crate::egui_app::records_api::RecordStore;
use crate::egui_app::session_store::{SessionStore, StoredSession};
use crate::egui_app::types::Session;
use crate::shared::contact::NewContact;
use crate::shared::error::AppError;

struct Account {
    uid: String,
    password: String,
}

/// Identity provider keeping accounts in a map
pub struct MemoryIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    sessions: SessionStore,
    next_uid: AtomicUsize,
}

impl MemoryIdentity {
    pub fn new(sessions: SessionStore) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            sessions,
            next_uid: AtomicUsize::new(1),
        }
    }

    fn start_session(&self, uid: String, email: &str) -> Session {
        let stored = StoredSession {
            uid: uid.clone(),
            email: Some(email.to_string()),
            id_token: format!("memory-token-{}", uid),
            refresh_token: format!("memory-refresh-{}", uid),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        };
        let session = stored.session();
        self.sessions.set(stored);
        session
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    fn current_session(&self) -> Option<Session> {
        self.sessions.get().map(|stored| stored.session())
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let uid = {
            let mut accounts = self
                .accounts
                .lock()
                .map_err(|_| AppError::provider("INTERNAL_ERROR"))?;
            if accounts.contains_key(email) {
                return Err(AppError::provider("EMAIL_EXISTS"));
            }
            let uid = format!("local-{}", self.next_uid.fetch_add(1, Ordering::SeqCst));
            accounts.insert(
                email.to_string(),
                Account {
                    uid: uid.clone(),
                    password: password.to_string(),
                },
            );
            uid
        };
        Ok(self.start_session(uid, email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let uid = {
            let accounts = self
                .accounts
                .lock()
                .map_err(|_| AppError::provider("INTERNAL_ERROR"))?;
            match accounts.get(email) {
                Some(account) if account.password == password => account.uid.clone(),
                _ => return Err(AppError::provider("INVALID_LOGIN_CREDENTIALS")),
            }
        };
        Ok(self.start_session(uid, email))
    }

    fn sign_out(&self) {
        self.sessions.clear();
    }
}

#[async_trait]
impl TokenSource for MemoryIdentity {
    async fn id_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.sessions.get().map(|stored| stored.id_token))
    }
}

/// Record store keeping the collection in a map
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Value>>,
    keys: PushIdGenerator,
    last_timestamp: Mutex<i64>,
    writes: AtomicUsize,
    fail_keys: AtomicBool,
    fail_writes: Mutex<Option<String>>,
    fail_reads: Mutex<Option<String>>,
    write_delay: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write calls that reached the store, failed ones included
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make `generate_key` return `None`
    pub fn fail_key_generation(&self, fail: bool) {
        self.fail_keys.store(fail, Ordering::SeqCst);
    }

    /// Make writes fail with `message`, or succeed again with `None`
    pub fn fail_writes(&self, message: Option<&str>) {
        if let Ok(mut slot) = self.fail_writes.lock() {
            *slot = message.map(str::to_string);
        }
    }

    /// Make reads fail with `message`, or succeed again with `None`
    pub fn fail_reads(&self, message: Option<&str>) {
        if let Ok(mut slot) = self.fail_reads.lock() {
            *slot = message.map(str::to_string);
        }
    }

    /// Hold every write in flight for `delay`
    pub fn set_write_delay(&self, delay: Option<Duration>) {
        if let Ok(mut slot) = self.write_delay.lock() {
            *slot = delay;
        }
    }

    /// Put a raw child into the collection, bypassing validation
    pub fn insert_raw(&self, key: impl Into<String>, value: Value) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(key.into(), value);
        }
    }

    /// Server clock: wall time, never behind the previous stamp
    fn server_now(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        match self.last_timestamp.lock() {
            Ok(mut last) => {
                let stamp = now.max(*last);
                *last = stamp;
                stamp
            }
            Err(_) => now,
        }
    }
}

/// Replace every `{".sv": "timestamp"}` placeholder with `timestamp`
fn resolve_server_values(value: Value, timestamp: i64) -> Value {
    match value {
        Value::Object(map) if is_timestamp_sentinel(&map) => Value::from(timestamp),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, resolve_server_values(v, timestamp)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| resolve_server_values(v, timestamp))
                .collect(),
        ),
        other => other,
    }
}

fn is_timestamp_sentinel(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.get(".sv").and_then(Value::as_str) == Some("timestamp")
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn generate_key(&self) -> Option<String> {
        if self.fail_keys.load(Ordering::SeqCst) {
            return None;
        }
        self.keys.generate()
    }

    async fn write(&self, key: &str, contact: &NewContact) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        let delay = self.write_delay.lock().ok().and_then(|slot| *slot);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.fail_writes.lock().ok().and_then(|slot| slot.clone()) {
            return Err(AppError::provider(message));
        }

        let value = resolve_server_values(serde_json::to_value(contact)?, self.server_now());
        self.insert_raw(key, value);
        Ok(())
    }

    async fn read_all_once(&self) -> Result<Value, AppError> {
        if let Some(message) = self.fail_reads.lock().ok().and_then(|slot| slot.clone()) {
            return Err(AppError::provider(message));
        }

        let records = self
            .records
            .lock()
            .map_err(|_| AppError::provider("INTERNAL_ERROR"))?;
        if records.is_empty() {
            return Ok(Value::Null);
        }
        Ok(Value::Object(
            records.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        ))
    }
}
