use std::str::FromStr;

use anyhow::{Context, Result};

use crate::forms::schema::DEFAULT_MAX_PHOTO_BYTES;
use crate::render::sections::REFERENCE_WIDTH;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a value that does not parse fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Width the résumé pages are authored at.
    pub reference_width: f64,
    pub max_photo_bytes: usize,
    /// Live display handles allowed across all sessions.
    pub max_display_handles: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            reference_width: REFERENCE_WIDTH,
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            max_display_handles: 256,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let reference_width: f64 = env_or("REFERENCE_WIDTH", defaults.reference_width)?;
        if !(reference_width.is_finite() && reference_width > 0.0) {
            anyhow::bail!("REFERENCE_WIDTH must be a positive number");
        }

        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            reference_width,
            max_photo_bytes: env_or("MAX_PHOTO_BYTES", defaults.max_photo_bytes)?,
            max_display_handles: env_or("MAX_DISPLAY_HANDLES", defaults.max_display_handles)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
