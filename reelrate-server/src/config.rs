use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime configuration, sourced from the environment (with `.env`
/// support) and optionally overridden by CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub static_dir: PathBuf,
    /// Comma-separated allowlist; empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit_enabled: bool,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    /// Development deployments attach full data-access error detail to
    /// responses; production deployments return opaque messages.
    pub expose_internal_errors: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET must be set (mutation routes are token-gated)")?;

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit_enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let rate_limit_max_requests = std::env::var("RATE_LIMIT_MAX_REQUESTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(120);
        let rate_limit_window = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));

        let expose_internal_errors = std::env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url: std::env::var("DATABASE_URL").ok(),
            jwt_secret,
            static_dir,
            cors_allowed_origins,
            rate_limit_enabled,
            rate_limit_max_requests,
            rate_limit_window,
            expose_internal_errors,
        })
    }

    /// A config suitable for in-process tests: no database, permissive
    /// limits, internals exposed.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: None,
            jwt_secret: jwt_secret.to_string(),
            static_dir: PathBuf::from("static"),
            cors_allowed_origins: vec![],
            rate_limit_enabled: false,
            rate_limit_max_requests: 1000,
            rate_limit_window: Duration::from_secs(60),
            expose_internal_errors: true,
        }
    }
}
