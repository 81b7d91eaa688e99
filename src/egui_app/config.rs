use std::path::PathBuf;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, ProviderKind};

/// Environment variable naming an explicit config file
const CONFIG_FILE_ENV: &str = "CONTACT_BOOK_CONFIG";

/// Runtime configuration wrapper: resolved settings plus endpoint helpers.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Resolve configuration from `.env`, the config file and the environment,
    /// in that order of increasing precedence.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut builder = AppConfig::builder();
        if let Some(path) = config_file_path() {
            if path.exists() {
                tracing::debug!("Reading config file {}", path.display());
                let source = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
                builder = builder.merge_toml(&source)?;
            }
        }

        Self::with_builder(apply_env(builder, |key| std::env::var(key).ok())?)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Configuration for the in-process providers
    pub fn memory() -> Self {
        Self {
            app: AppConfig {
                provider: ProviderKind::Memory,
                api_key: None,
                database_url: None,
                identity_url: crate::shared::config::DEFAULT_IDENTITY_URL.to_string(),
                secure_token_url: crate::shared::config::DEFAULT_SECURE_TOKEN_URL.to_string(),
                records_path: crate::shared::config::DEFAULT_RECORDS_PATH.to_string(),
                session_file: None,
            },
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.app.provider
    }

    pub fn api_key(&self) -> &str {
        self.app.api_key.as_deref().unwrap_or_default()
    }

    /// Account creation endpoint
    pub fn sign_up_url(&self) -> String {
        format!("{}/v1/accounts:signUp", self.app.identity_url)
    }

    /// Password sign-in endpoint
    pub fn sign_in_url(&self) -> String {
        format!("{}/v1/accounts:signInWithPassword", self.app.identity_url)
    }

    /// Token refresh endpoint
    pub fn refresh_url(&self) -> String {
        format!("{}/v1/token", self.app.secure_token_url)
    }

    /// REST location of the whole records collection
    pub fn records_url(&self) -> String {
        format!("{}/{}.json", self.database_url(), self.app.records_path)
    }

    /// REST location of a single record
    pub fn record_url(&self, key: &str) -> String {
        format!("{}/{}/{}.json", self.database_url(), self.app.records_path, key)
    }

    /// Where the session is kept; `None` keeps it in memory only
    pub fn session_path(&self) -> Option<PathBuf> {
        match self.app.provider {
            ProviderKind::Memory => self.app.session_file.clone(),
            ProviderKind::Firebase => self
                .app
                .session_file
                .clone()
                .or_else(crate::egui_app::session_store::SessionStore::default_path),
        }
    }

    fn database_url(&self) -> &str {
        self.app.database_url.as_deref().unwrap_or_default()
    }
}

fn config_file_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_FILE_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("contact_book").join("config.toml")))
}

/// Apply environment overrides through `lookup`
fn apply_env(
    mut builder: AppConfigBuilder,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfigBuilder, ConfigError> {
    if let Some(provider) = lookup("CONTACT_BOOK_PROVIDER") {
        builder = builder.provider(provider.parse()?);
    }
    if let Some(key) = lookup("FIREBASE_API_KEY") {
        builder = builder.api_key(key);
    }
    if let Some(url) = lookup("FIREBASE_DATABASE_URL") {
        builder = builder.database_url(url);
    }
    if let Some(url) = lookup("FIREBASE_IDENTITY_URL") {
        builder = builder.identity_url(url);
    }
    if let Some(url) = lookup("FIREBASE_SECURE_TOKEN_URL") {
        builder = builder.secure_token_url(url);
    }
    if let Some(path) = lookup("CONTACT_BOOK_RECORDS_PATH") {
        builder = builder.records_path(path);
    }
    if let Some(path) = lookup("CONTACT_BOOK_SESSION_FILE") {
        builder = builder.session_file(path);
    }
    Ok(builder)
}
