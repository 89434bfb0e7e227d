//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx connection URL of the roster database
    pub database_url: String,
    /// Pool size for the roster database
    pub database_max_connections: u32,

    /// Directory holding catalog photos
    pub image_root: PathBuf,

    /// Overrides `RUST_LOG` when set
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:orbat.db?mode=rwc".to_string()),
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,

            image_root: lookup("IMAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/images")),

            log_filter: lookup("LOG_FILTER")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}
