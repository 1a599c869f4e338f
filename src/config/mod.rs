//! Configuration module for ticketd.
//!
//! The service is configured via a TOML file, with support for environment
//! variable interpolation using `${VAR_NAME}` syntax.
//!
//! # Example
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [database]
//! path = "${TICKETD_DATA_DIR}/ticketd.db"
//! ```

mod auth;
mod database;
mod server;

use std::path::{Path, PathBuf};

pub use auth::*;
pub use database::*;
use serde::{Deserialize, Serialize};
pub use server::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Root configuration for the ticket service.
///
/// All sections are optional with sensible defaults, allowing minimal
/// configuration for simple deployments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicketdConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration for persistent storage.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication boundary configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl TicketdConfig {
    /// Load configuration from a TOML file.
    ///
    /// Environment variables in the format `${VAR_NAME}` are expanded.
    /// Missing required variables will cause an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(contents)?;
        let config: TicketdConfig = toml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and completeness.
    fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;

        // The identity header is trusted as-is, so exposing the listener
        // beyond localhost without a proxy in front allows anyone to
        // impersonate any user.
        if !self.server.host.is_loopback() {
            tracing::warn!(
                "Server binds to a non-localhost address. The identity header \
                 ({}) will be trusted from ANY client; this is safe only if the \
                 service is exclusively reachable through an authenticating \
                 reverse proxy.",
                self.auth.identity_header
            );
        }

        Ok(())
    }
}

/// Expand `${VAR_NAME}` references against the process environment.
fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut missing = None;

    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        match std::env::var(&caps[1]) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| caps[1].to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(ConfigError::MissingEnvVar(name)),
        None => Ok(expanded.into_owned()),
    }
}
