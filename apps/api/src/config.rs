use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON array of custom role profiles merged into the predefined registry.
    pub role_profiles_path: Option<PathBuf>,
    pub search_default_limit: usize,
    pub search_max_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            role_profiles_path: None,
            search_default_limit: 20,
            search_max_limit: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            role_profiles_path: std::env::var("ROLE_PROFILES_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            search_default_limit: parse_env("SEARCH_DEFAULT_LIMIT", defaults.search_default_limit)?,
            search_max_limit: parse_env("SEARCH_MAX_LIMIT", defaults.search_max_limit)?,
        };

        anyhow::ensure!(
            (1..=config.search_max_limit).contains(&config.search_default_limit),
            "SEARCH_DEFAULT_LIMIT must be between 1 and SEARCH_MAX_LIMIT ({})",
            config.search_max_limit
        );

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
