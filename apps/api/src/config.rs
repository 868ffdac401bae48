use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Directory resumes are written into and served from.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: parse_env("PORT", DEFAULT_PORT)?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("REFERRALS_TEST_UNSET_PORT", 8001).unwrap();
        assert_eq!(port, 8001);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("REFERRALS_TEST_BAD_LIMIT", "ten megabytes");
        let result: Result<usize> = parse_env("REFERRALS_TEST_BAD_LIMIT", 1);
        assert!(result.is_err());
        std::env::remove_var("REFERRALS_TEST_BAD_LIMIT");
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("REFERRALS_TEST_MISSING_URL").unwrap_err();
        assert!(err.to_string().contains("REFERRALS_TEST_MISSING_URL"));
    }
}
