//! Application configuration module
//!
//! [`AppConfig`] describes which providers the app talks to and where they
//! live. It is assembled with [`AppConfigBuilder`], which accepts values from
//! a TOML document and from individual setters; [`AppConfigBuilder::build`]
//! checks the result.

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Default Firebase Authentication endpoint
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";

/// Default token refresh endpoint
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com";

/// Default collection holding the contact records
pub const DEFAULT_RECORDS_PATH: &str = "contacts";

/// Which provider implementation backs the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Hosted Firebase Authentication + Realtime Database
    #[default]
    Firebase,
    /// In-process providers, nothing leaves the machine
    Memory,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firebase" => Ok(Self::Firebase),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                key: "provider",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderKind,
    /// Web API key of the Firebase project
    pub api_key: Option<String>,
    /// Realtime Database root, without trailing slash
    pub database_url: Option<String>,
    pub identity_url: String,
    pub secure_token_url: String,
    /// Collection under the database root where records live
    pub records_path: String,
    /// Where the signed-in session is persisted
    pub session_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider == ProviderKind::Firebase {
            match self.api_key.as_deref() {
                Some(key) if !key.trim().is_empty() => {}
                _ => return Err(ConfigError::MissingValue("api_key")),
            }
            let url = self
                .database_url
                .as_deref()
                .ok_or(ConfigError::MissingValue("database_url"))?;
            check_url(url)?;
            check_url(&self.identity_url)?;
            check_url(&self.secure_token_url)?;
        }

        if self.records_path.is_empty()
            || self.records_path.starts_with('/')
            || self.records_path.ends_with('/')
        {
            return Err(ConfigError::InvalidValue {
                key: "records_path",
                value: self.records_path.clone(),
            });
        }

        Ok(())
    }
}

fn check_url(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl(url.to_string()))
    }
}

/// Shape of the optional TOML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    provider: Option<String>,
    api_key: Option<String>,
    database_url: Option<String>,
    identity_url: Option<String>,
    secure_token_url: Option<String>,
    records_path: Option<String>,
    session_file: Option<PathBuf>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    database_url: Option<String>,
    identity_url: Option<String>,
    secure_token_url: Option<String>,
    records_path: Option<String>,
    session_file: Option<PathBuf>,
}

impl AppConfigBuilder {
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = Some(url.into());
        self
    }

    pub fn secure_token_url(mut self, url: impl Into<String>) -> Self {
        self.secure_token_url = Some(url.into());
        self
    }

    pub fn records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = Some(path.into());
        self
    }

    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Layer the values of a TOML document over what is already set
    pub fn merge_toml(mut self, source: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(provider) = file.provider {
            self.provider = Some(provider.parse()?);
        }
        self.api_key = file.api_key.or(self.api_key);
        self.database_url = file.database_url.or(self.database_url);
        self.identity_url = file.identity_url.or(self.identity_url);
        self.secure_token_url = file.secure_token_url.or(self.secure_token_url);
        self.records_path = file.records_path.or(self.records_path);
        self.session_file = file.session_file.or(self.session_file);
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            provider: self.provider.unwrap_or_default(),
            api_key: self.api_key,
            database_url: self
                .database_url
                .map(|url| url.trim_end_matches('/').to_string()),
            identity_url: self
                .identity_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_IDENTITY_URL.to_string()),
            secure_token_url: self
                .secure_token_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SECURE_TOKEN_URL.to_string()),
            records_path: self
                .records_path
                .unwrap_or_else(|| DEFAULT_RECORDS_PATH.to_string()),
            session_file: self.session_file,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("could not parse config file: {0}")]
    Parse(String),
    #[error("could not read config file: {0}")]
    Io(String),
}
