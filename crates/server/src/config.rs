//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `QUITANDA_HOST` - Bind address (default: 127.0.0.1)
//! - `QUITANDA_PORT` - Listen port (default: 3000)
//! - `QUITANDA_DATA_DIR` - Directory for the local key-value store
//!   (default: `data`)
//! - `QUITANDA_CATALOG_PATH` - JSON catalog file (default:
//!   `data/catalog.json`; missing file means an empty catalog)
//! - `QUITANDA_ADMIN_TOKEN` / `QUITANDA_ADMIN_EMAIL` / `QUITANDA_ADMIN_NAME`
//!   - seed one admin identity (all three required together)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use quitanda_core::{Email, EmailError};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Incomplete admin seed: {0} is set but {1} is missing")]
    IncompleteAdminSeed(&'static str, &'static str),
    #[error("Invalid QUITANDA_ADMIN_EMAIL: {0}")]
    InvalidAdminEmail(#[from] EmailError),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory backing the local key-value store (cart snapshots)
    pub data_dir: PathBuf,
    /// Path to the JSON product catalog
    pub catalog_path: PathBuf,
    /// Optional seeded admin identity
    pub admin_seed: Option<AdminSeed>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// One admin identity seeded from the environment.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub token: String,
    pub email: Email,
    pub name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// admin seed is only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("QUITANDA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("QUITANDA_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("QUITANDA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("QUITANDA_PORT".to_owned(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("QUITANDA_DATA_DIR", "data"));
        let catalog_path =
            PathBuf::from(get_env_or_default("QUITANDA_CATALOG_PATH", "data/catalog.json"));

        let admin_seed = load_admin_seed(
            get_optional_env("QUITANDA_ADMIN_TOKEN"),
            get_optional_env("QUITANDA_ADMIN_EMAIL"),
            get_optional_env("QUITANDA_ADMIN_NAME"),
        )?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            data_dir,
            catalog_path,
            admin_seed,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Combine the three admin seed variables; all or nothing.
fn load_admin_seed(
    token: Option<String>,
    email: Option<String>,
    name: Option<String>,
) -> Result<Option<AdminSeed>, ConfigError> {
    match (token, email, name) {
        (None, None, None) => Ok(None),
        (Some(token), Some(email), Some(name)) => Ok(Some(AdminSeed {
            token,
            email: Email::parse(&email)?,
            name,
        })),
        (Some(_), None, _) | (Some(_), _, None) => Err(ConfigError::IncompleteAdminSeed(
            "QUITANDA_ADMIN_TOKEN",
            "QUITANDA_ADMIN_EMAIL/QUITANDA_ADMIN_NAME",
        )),
        (None, ..) => Err(ConfigError::IncompleteAdminSeed(
            "QUITANDA_ADMIN_EMAIL or QUITANDA_ADMIN_NAME",
            "QUITANDA_ADMIN_TOKEN",
        )),
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
