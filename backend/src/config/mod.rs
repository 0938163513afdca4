//! Application configuration management

use std::env;

use anyhow::{Context, Result};
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// SQLite URL (`sqlite:...`) or plain file path.
    /// DATABASE_URL takes precedence over DATABASE_PATH.
    pub database_url: String,

    /// Upper bound on pooled connections
    pub database_max_connections: u32,

    /// HS256 secret for verifying caller tokens
    pub jwt_secret: String,

    /// True when JWT_SECRET was absent and a random secret was generated.
    /// No externally issued token will verify against it.
    pub jwt_secret_generated: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = var("DATABASE_URL")
            .or_else(|| var("DATABASE_PATH"))
            .unwrap_or_else(|| "sqlite:./data/taproom.db".to_string());

        let (jwt_secret, jwt_secret_generated) = match var("JWT_SECRET") {
            Some(secret) if !secret.trim().is_empty() => (secret, false),
            // In production, this should be set explicitly
            _ => (dev_secret(), true),
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: var("PORT")
                .unwrap_or_else(|| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,

            jwt_secret,
            jwt_secret_generated,
        })
    }
}

fn dev_secret() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    format!("dev-secret-{}", suffix)
}
