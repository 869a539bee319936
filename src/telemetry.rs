//! `tracing` subscriber construction.
//!
//! Services only emit events. The host builds a [`Dispatch`] here and
//! installs it, globally or scoped to a test.

use crate::config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing::Dispatch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

/// Errors raised while building the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level is not a valid `EnvFilter` directive.
    #[error("invalid log filter {directive:?}: {message}")]
    InvalidFilter {
        /// Rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("global subscriber already installed")]
    AlreadyInstalled,
}

/// Builds a dispatcher from logging settings.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the level does not parse.
pub fn build_dispatch(config: &LoggingConfig) -> Result<Dispatch, TelemetryError> {
    let filter =
        EnvFilter::try_new(&config.level).map_err(|err| TelemetryError::InvalidFilter {
            directive: config.level.clone(),
            message: err.to_string(),
        })?;
    let registry = tracing_subscriber::registry().with(filter);
    let dispatch = match config.format {
        LogFormat::Json => Dispatch::new(registry.with(tracing_subscriber::fmt::layer().json())),
        LogFormat::Pretty => {
            Dispatch::new(registry.with(tracing_subscriber::fmt::layer().pretty()))
        }
    };
    Ok(dispatch)
}

/// Builds a dispatcher and installs it as the global default.
///
/// # Errors
///
/// Returns the errors of [`build_dispatch`] and
/// [`TelemetryError::AlreadyInstalled`] when called twice.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let dispatch = build_dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|_| TelemetryError::AlreadyInstalled)
}
