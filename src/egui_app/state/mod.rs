use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::egui_app::auth::{FirebaseAuthClient, IdentityProvider};
use crate::egui_app::memory::{MemoryIdentity, MemoryStore};
use crate::egui_app::notifications::Notifications;
use crate::egui_app::records_api::{load_all_once, save_contact, RealtimeDbClient, RecordStore};
use crate::egui_app::session_store::SessionStore;
use crate::egui_app::{AppView, Config, Navigator, Session};
use crate::shared::config::ProviderKind;
use crate::shared::error::AppError;
use crate::shared::listing::LoadedRecords;

pub mod auth_screen;
pub mod record_screen;

pub use auth_screen::{AuthAction, AuthScreen};
pub use record_screen::{RecordScreen, SaveControl, SaveGuard};

type AuthResult = (AuthAction, Result<Session, AppError>);

/// Result of a dispatched task, tagged with the screen epoch it belongs to
struct Pending<T> {
    epoch: u64,
    rx: Receiver<T>,
}

enum Delivery<T> {
    Ready(T),
    Waiting,
    Lost,
}

impl<T> Pending<T> {
    fn poll(&self) -> Delivery<T> {
        match self.rx.try_recv() {
            Ok(value) => Delivery::Ready(value),
            Err(TryRecvError::Empty) => Delivery::Waiting,
            Err(TryRecvError::Disconnected) => Delivery::Lost,
        }
    }
}

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    pub navigator: Navigator,
    pub session: Option<Session>,
    pub auth_screen: AuthScreen,
    pub record_screen: RecordScreen,
    pub notifications: Notifications,
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn RecordStore>,
    runtime: Runtime,
    /// Bumped on every screen transition
    epoch: u64,
    pending_auth: Option<Pending<AuthResult>>,
    pending_save: Option<Pending<(Result<String, AppError>, SaveGuard)>>,
    pending_load: Option<Pending<Result<LoadedRecords, AppError>>>,
}

impl AppState {
    /// Build the providers named by `config` and open the first screen
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let sessions = match config.session_path() {
            Some(path) => SessionStore::open(path),
            None => SessionStore::in_memory(),
        };

        let (identity, store): (Arc<dyn IdentityProvider>, Arc<dyn RecordStore>) =
            match config.provider() {
                ProviderKind::Firebase => {
                    let auth = Arc::new(FirebaseAuthClient::new(config.clone(), sessions));
                    let store = RealtimeDbClient::new(config.clone(), auth.clone());
                    (auth as Arc<dyn IdentityProvider>, Arc::new(store) as Arc<dyn RecordStore>)
                }
                ProviderKind::Memory => {
                    tracing::warn!("Using in-memory providers; nothing will be persisted remotely");
                    (
                        Arc::new(MemoryIdentity::new(sessions)) as Arc<dyn IdentityProvider>,
                        Arc::new(MemoryStore::new()) as Arc<dyn RecordStore>,
                    )
                }
            };

        Self::new(config, identity, store)
    }

    /// Open the first screen: the record screen when a session already
    /// exists, the authentication screen otherwise.
    pub fn new(
        config: Config,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("contact-book-io")
            .enable_all()
            .build()
            .map_err(|e| AppError::provider(format!("Failed to create runtime: {}", e)))?;

        let session = identity.current_session();
        let root = if session.is_some() {
            AppView::Records
        } else {
            AppView::Auth
        };
        tracing::info!(
            "Starting on {:?} screen ({})",
            root,
            if session.is_some() { "session found" } else { "no session" }
        );

        Ok(Self {
            config,
            navigator: Navigator::new(root),
            record_screen: RecordScreen::new(session.as_ref()),
            session,
            auth_screen: AuthScreen::new(),
            notifications: Notifications::new(),
            identity,
            store,
            runtime,
            epoch: 0,
            pending_auth: None,
            pending_save: None,
            pending_load: None,
        })
    }

    pub fn current_view(&self) -> AppView {
        self.navigator.current()
    }

    /// Whether any dispatched task has not reported back yet
    pub fn has_pending(&self) -> bool {
        self.pending_auth.is_some() || self.pending_save.is_some() || self.pending_load.is_some()
    }

    fn dispatch<T, F>(&self, task: F) -> Pending<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let _ = tx.send(task.await);
        });
        Pending {
            epoch: self.epoch,
            rx,
        }
    }

    pub fn submit_register(&mut self) {
        self.submit_auth(AuthAction::Register);
    }

    pub fn submit_login(&mut self) {
        self.submit_auth(AuthAction::Login);
    }

    fn submit_auth(&mut self, action: AuthAction) {
        let Some((email, password)) = self.auth_screen.begin() else {
            return;
        };
        tracing::debug!("Dispatching {:?}", action);

        let identity = Arc::clone(&self.identity);
        self.pending_auth = Some(self.dispatch(async move {
            let result = match action {
                AuthAction::Register => identity.create_account(&email, &password).await,
                AuthAction::Login => identity.sign_in(&email, &password).await,
            };
            (action, result)
        }));
    }

    pub fn submit_save(&mut self) {
        let Some((contact, guard)) = self.record_screen.begin_save() else {
            return;
        };
        tracing::debug!("Dispatching save");

        // The guard rides back with the result so the control is re-enabled
        // only once the outcome is applied. A dropped receiver or a panicking
        // task drops it too.
        let store = Arc::clone(&self.store);
        self.pending_save = Some(self.dispatch(async move {
            let result = save_contact(store.as_ref(), &contact).await;
            (result, guard)
        }));
    }

    pub fn submit_load(&mut self) {
        self.record_screen.begin_load();
        tracing::debug!("Dispatching load");

        let store = Arc::clone(&self.store);
        self.pending_load = Some(self.dispatch(async move { load_all_once(store.as_ref()).await }));
    }

    /// Sign out and start over on the authentication screen
    pub fn sign_out(&mut self) {
        self.identity.sign_out();
        self.session = None;
        self.epoch += 1;
        self.auth_screen = AuthScreen::new();
        self.record_screen = RecordScreen::new(None);
        self.navigator.reset_to(AppView::Auth);
    }

    fn enter_records(&mut self, session: Session) {
        self.epoch += 1;
        self.record_screen = RecordScreen::new(Some(&session));
        self.session = Some(session);
        self.auth_screen = AuthScreen::new();
        self.navigator.replace(AppView::Records);
    }

    /// Apply every result that has arrived since the last frame.
    ///
    /// Results tagged with an older epoch belong to a screen that has been
    /// left and are dropped.
    pub fn poll(&mut self) {
        if let Some(pending) = self.pending_auth.take() {
            match pending.poll() {
                Delivery::Ready((action, result)) => {
                    if pending.epoch == self.epoch {
                        if let Some(session) =
                            self.auth_screen
                                .apply_result(action, result, &mut self.notifications)
                        {
                            self.enter_records(session);
                        }
                    } else {
                        tracing::debug!("Dropping stale {:?} result", action);
                    }
                }
                Delivery::Waiting => self.pending_auth = Some(pending),
                Delivery::Lost => {
                    tracing::error!("Authentication task ended without a result");
                    if pending.epoch == self.epoch {
                        self.auth_screen.busy = false;
                    }
                }
            }
        }

        if let Some(pending) = self.pending_save.take() {
            match pending.poll() {
                Delivery::Ready((result, guard)) if pending.epoch == self.epoch => {
                    self.record_screen
                        .apply_save_result(result, &mut self.notifications);
                    drop(guard);
                }
                Delivery::Ready(_) => tracing::debug!("Dropping stale save result"),
                Delivery::Waiting => self.pending_save = Some(pending),
                Delivery::Lost => tracing::error!("Save task ended without a result"),
            }
        }

        if let Some(pending) = self.pending_load.take() {
            match pending.poll() {
                Delivery::Ready(result) if pending.epoch == self.epoch => {
                    self.record_screen
                        .apply_load_result(result, &mut self.notifications);
                }
                Delivery::Ready(_) => tracing::debug!("Dropping stale load result"),
                Delivery::Waiting => self.pending_load = Some(pending),
                Delivery::Lost => {
                    tracing::error!("Load task ended without a result");
                    if pending.epoch == self.epoch {
                        self.record_screen.loading = false;
                    }
                }
            }
        }

        self.notifications.prune(std::time::Instant::now());
    }
}
