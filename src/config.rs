//! Typed application configuration.
//!
//! Configuration is read from a TOML document and then overridden from the
//! process environment:
//!
//! | Variable                  | Field                |
//! |---------------------------|----------------------|
//! | `SKILLTRACK_DATABASE_URL` | `database.url`       |
//! | `SKILLTRACK_JWT_SECRET`   | `auth.jwt_secret`    |
//! | `SKILLTRACK_LOG_LEVEL`    | `logging.level`      |
//!
//! The resulting [`AppConfig`] is a plain value handed to the composition
//! root; nothing here is global.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding [`DatabaseConfig::url`].
pub const DATABASE_URL_VAR: &str = "SKILLTRACK_DATABASE_URL";
/// Environment variable overriding [`AuthConfig::jwt_secret`].
pub const JWT_SECRET_VAR: &str = "SKILLTRACK_JWT_SECRET";
/// Environment variable overriding [`LoggingConfig::level`].
pub const LOG_LEVEL_VAR: &str = "SKILLTRACK_LOG_LEVEL";

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Developer workstation.
    #[default]
    Local,
    /// Shared development deployment.
    Dev,
    /// Production deployment.
    Prod,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL. Empty selects in-memory storage.
    pub url: String,
    /// Maximum pool size.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
        }
    }
}

/// Token signing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub jwt_secret: String,
    /// Token issuer claim.
    pub issuer: String,
    /// Token lifetime in hours.
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: "skilltrack".to_owned(),
            token_ttl_hours: 24,
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Log subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, for example `info` or `skilltrack=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Token settings.
    pub auth: AuthConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The document is not valid TOML for [`AppConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// No signing secret was configured.
    #[error("auth.jwt_secret must be set (or {JWT_SECRET_VAR})")]
    MissingJwtSecret,
    /// The token lifetime is not positive.
    #[error("auth.token_ttl_hours must be positive, got {0}")]
    InvalidTokenTtl(i64),
}

impl AppConfig {
    /// Reads, overrides from the environment, and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] for unusable
    /// files and the validation errors of [`AppConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let content = std::fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document; missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid documents.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = present(DATABASE_URL_VAR) {
            self.database.url = url;
        }
        if let Some(secret) = present(JWT_SECRET_VAR) {
            self.auth.jwt_secret = secret;
        }
        if let Some(level) = present(LOG_LEVEL_VAR) {
            self.logging.level = level;
        }
    }

    /// Checks settings that have no usable default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingJwtSecret`] or
    /// [`ConfigError::InvalidTokenTtl`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::InvalidTokenTtl(self.auth.token_ttl_hours));
        }
        Ok(())
    }
}
