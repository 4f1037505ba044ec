use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const BASE_STYLESHEET: &str = "assets/bootstrap.css";
pub const VERIFY_STYLESHEET: &str = "assets/verify-signature.css";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("launch url invalid: {0}")]
    LaunchUrl(String),
    #[error("launch parameter missing: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone)]
pub struct DialogConfig {
    pub response_timeout_ms: u64,
    pub locale_dir: Option<PathBuf>,
    pub stylesheets: Vec<String>,
    pub max_frame_bytes: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            response_timeout_ms: 30_000,
            locale_dir: None,
            stylesheets: vec![BASE_STYLESHEET.to_owned(), VERIFY_STYLESHEET.to_owned()],
            max_frame_bytes: 1024 * 1024,
        }
    }
}

impl DialogConfig {
    /// Reads `VERIFY_DIALOG_*` overrides on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("VERIFY_DIALOG_RESPONSE_TIMEOUT_MS") {
            cfg.response_timeout_ms = parse_number("VERIFY_DIALOG_RESPONSE_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("VERIFY_DIALOG_MAX_FRAME_BYTES") {
            cfg.max_frame_bytes = parse_number("VERIFY_DIALOG_MAX_FRAME_BYTES", &v)?;
        }
        if let Some(v) = lookup("VERIFY_DIALOG_LOCALE_DIR").filter(|v| !v.trim().is_empty()) {
            cfg.locale_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("VERIFY_DIALOG_STYLESHEETS") {
            cfg.stylesheets = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
        }
        Ok(cfg)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_owned(),
    })
}
