//! Record screen state
//!
//! Form inputs, the displayed list and the save control. Handlers take the
//! notification queue explicitly and never touch the network; dispatching
//! the async work is the caller's job.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::egui_app::notifications::Notifications;
use crate::egui_app::types::Session;
use crate::shared::contact::{ContactRecord, NewContact};
use crate::shared::error::{AppError, Field};
use crate::shared::listing::LoadedRecords;
use crate::shared::validation::validate_contact;

/// Enabled/disabled flag of the save button.
///
/// Disabled exactly while a [`SaveGuard`] is alive.
#[derive(Debug, Clone, Default)]
pub struct SaveControl {
    in_flight: Arc<AtomicBool>,
}

impl SaveControl {
    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::SeqCst)
    }

    /// Disable the control; `None` if a save is already in flight
    pub fn acquire(&self) -> Option<SaveGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SaveGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }
}

/// Re-enables the save control when dropped
#[derive(Debug)]
pub struct SaveGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Everything the record screen shows
#[derive(Debug, Default)]
pub struct RecordScreen {
    pub name_input: String,
    pub email_input: String,
    pub message_input: String,
    /// Inline error on a single input
    pub field_error: Option<(Field, String)>,
    /// Last loaded list, newest first
    pub records: Vec<ContactRecord>,
    /// The list stays hidden until the first load request
    pub list_visible: bool,
    pub loading: bool,
    save_control: SaveControl,
}

impl RecordScreen {
    /// Fresh screen; the email input starts with the session's email
    pub fn new(session: Option<&Session>) -> Self {
        Self {
            email_input: session
                .and_then(|s| s.email.clone())
                .unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn save_enabled(&self) -> bool {
        self.save_control.is_enabled()
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        match &self.field_error {
            Some((f, message)) if *f == field => Some(message.as_str()),
            _ => None,
        }
    }

    /// Validate the form and take the save control.
    ///
    /// On a validation failure the offending field is marked and `None` is
    /// returned; the same happens, silently, when a save is already running.
    pub fn begin_save(&mut self) -> Option<(NewContact, SaveGuard)> {
        self.field_error = None;

        let contact = match validate_contact(&self.name_input, &self.email_input, &self.message_input) {
            Ok(contact) => contact,
            Err(AppError::Validation { field, message }) => {
                self.field_error = Some((field, message));
                return None;
            }
            Err(_) => return None,
        };

        let guard = self.save_control.acquire()?;
        Some((contact, guard))
    }

    pub fn apply_save_result(&mut self, result: Result<String, AppError>, notes: &mut Notifications) {
        match result {
            Ok(_key) => {
                self.name_input.clear();
                self.message_input.clear();
                notes.info("Saved");
            }
            Err(AppError::Validation { field, message }) => {
                self.field_error = Some((field, message));
            }
            Err(AppError::KeyGeneration) => notes.error(AppError::KeyGeneration.to_string()),
            Err(e) => notes.error(format!("Error: {}", e.user_message())),
        }
    }

    /// Show the list area and mark a load as running
    pub fn begin_load(&mut self) {
        self.list_visible = true;
        self.loading = true;
    }

    pub fn apply_load_result(
        &mut self,
        result: Result<LoadedRecords, AppError>,
        notes: &mut Notifications,
    ) {
        self.loading = false;
        match result {
            Ok(loaded) => {
                notes.info(format!("Records: {}", loaded.len()));
                self.records = loaded.records;
            }
            Err(e) => notes.error(format!("Load failed: {}", e.user_message())),
        }
    }
}
