//! Application configuration module
//!
//! Provides the configuration consumed by the server: the token signing
//! secret, the store location, and the GitHub proxy credentials.

use std::fmt;

use thiserror::Error;

/// Default token lifetime in seconds
pub const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 360_000;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default store location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://devconnector.db?mode=rwc";

/// Default GitHub API base URL
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Shared secret used to sign and verify tokens
    pub jwt_secret: String,
    /// sqlx connection string for the store
    pub database_url: String,
    /// HTTP listen port
    pub port: u16,
    /// Token lifetime in seconds
    pub token_expiry_secs: u64,
    /// GitHub OAuth client id (repository proxy only)
    pub github_client_id: Option<String>,
    /// GitHub OAuth client secret (repository proxy only)
    pub github_secret: Option<String>,
    /// GitHub API base URL
    pub github_api_url: String,
}

// Secrets stay out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("github_client_id", &self.github_client_id)
            .field("github_secret", &self.github_secret.as_ref().map(|_| "<redacted>"))
            .field("github_api_url", &self.github_api_url)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from a key lookup
    ///
    /// `lookup` returns the raw value for a variable name, or `None` if it
    /// is unset. The server passes an environment lookup; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port))?;
            builder = builder.port(port);
        }
        if let Some(expiry) = lookup("TOKEN_EXPIRY_SECS") {
            let secs = expiry
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_EXPIRY_SECS", expiry))?;
            builder = builder.token_expiry_secs(secs);
        }
        match (lookup("GITHUB_CLIENT_ID"), lookup("GITHUB_SECRET")) {
            (Some(id), Some(secret)) => builder = builder.github_credentials(id, secret),
            (Some(_), None) => return Err(ConfigError::MissingValue("GITHUB_SECRET")),
            (None, Some(_)) => return Err(ConfigError::MissingValue("GITHUB_CLIENT_ID")),
            (None, None) => {}
        }
        if let Some(url) = lookup("GITHUB_API_URL") {
            builder = builder.github_api_url(url);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.token_expiry_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "TOKEN_EXPIRY_SECS",
                self.token_expiry_secs.to_string(),
            ));
        }
        if !self.github_api_url.starts_with("http://") && !self.github_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.github_api_url.clone()));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    database_url: Option<String>,
    port: Option<u16>,
    token_expiry_secs: Option<u64>,
    github_credentials: Option<(String, String)>,
    github_api_url: Option<String>,
}

impl AppConfigBuilder {
    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the store connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the HTTP listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the token lifetime in seconds
    pub fn token_expiry_secs(mut self, secs: u64) -> Self {
        self.token_expiry_secs = Some(secs);
        self
    }

    /// Set the GitHub OAuth client id/secret pair
    pub fn github_credentials(mut self, client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.github_credentials = Some((client_id.into(), secret.into()));
        self
    }

    /// Set the GitHub API base URL
    pub fn github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = Some(url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        let (github_client_id, github_secret) = match self.github_credentials {
            Some((id, secret)) => (Some(id), Some(secret)),
            None => (None, None),
        };

        let config = AppConfig {
            jwt_secret,
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            token_expiry_secs: self.token_expiry_secs.unwrap_or(DEFAULT_TOKEN_EXPIRY_SECS),
            github_client_id,
            github_secret,
            github_api_url: self
                .github_api_url
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
