//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tracing::Level;
use url::Url;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// PostgreSQL connection string. Reports are kept in memory when unset.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_level: Level,
    pub allowed_origin: String,
    /// The dashboard URL that share links are built on.
    pub public_base_url: Url,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let db_max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string(), e.to_string())
            })?,
            Err(_) => 5,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Browser-facing Settings ---
        let allowed_origin = std::env::var("ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        HeaderValue::from_str(&allowed_origin).map_err(|e| {
            ConfigError::InvalidValue("ALLOWED_ORIGIN".to_string(), e.to_string())
        })?;

        let public_base_url_str = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/".to_string());
        let public_base_url = Url::parse(&public_base_url_str).map_err(|e| {
            ConfigError::InvalidValue("PUBLIC_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            bind_address,
            database_url,
            db_max_connections,
            log_level,
            allowed_origin,
            public_base_url,
        })
    }
}
