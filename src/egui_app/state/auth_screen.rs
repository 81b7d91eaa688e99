//! Authentication screen state

use crate::egui_app::notifications::Notifications;
use crate::egui_app::types::Session;
use crate::shared::error::AppError;
use crate::shared::validation::validate_credentials;

/// Which button was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Register,
    Login,
}

impl AuthAction {
    fn failure_prefix(self) -> &'static str {
        match self {
            AuthAction::Register => "Registration failed",
            AuthAction::Login => "Sign-in failed",
        }
    }
}

/// Email/password inputs with their inline errors
#[derive(Debug, Default)]
pub struct AuthScreen {
    pub email_input: String,
    pub password_input: String,
    pub email_error: Option<&'static str>,
    pub password_error: Option<&'static str>,
    /// A provider call is in flight
    pub busy: bool,
}

impl AuthScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate both inputs and return the credentials to submit.
    ///
    /// Both inline errors are refreshed on every call, so all problems show
    /// at once. The email is trimmed; the password is taken as typed.
    pub fn begin(&mut self) -> Option<(String, String)> {
        if self.busy {
            return None;
        }

        let email = self.email_input.trim().to_string();
        match validate_credentials(&email, &self.password_input) {
            Ok(()) => {
                self.email_error = None;
                self.password_error = None;
                self.busy = true;
                Some((email, self.password_input.clone()))
            }
            Err(errors) => {
                self.email_error = errors.email;
                self.password_error = errors.password;
                None
            }
        }
    }

    /// Record the provider's answer; returns the session on success
    pub fn apply_result(
        &mut self,
        action: AuthAction,
        result: Result<Session, AppError>,
        notes: &mut Notifications,
    ) -> Option<Session> {
        self.busy = false;
        match result {
            Ok(session) => {
                if action == AuthAction::Register {
                    notes.info("Registration successful");
                }
                Some(session)
            }
            Err(e) => {
                notes.error(format!("{}: {}", action.failure_prefix(), e.user_message()));
                None
            }
        }
    }
}
