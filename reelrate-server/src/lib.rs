//! # reelrate-server
//!
//! HTTP boundary of the reelrate movie-rating service.
//!
//! The server wires the aggregation core and storage ports from
//! `reelrate-core` into an Axum application: public read endpoints
//! (top-rated aggregation, movie listing, ratings), JWT-gated mutation
//! routes, per-client rate limiting, and a static chart frontend.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::fmt;
use std::sync::Arc;

use reelrate_core::CatalogBackend;

use crate::config::AppConfig;
use crate::middleware::rate_limit::SlidingWindowLimiter;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogBackend>,
    pub config: Arc<AppConfig>,
    pub limiter: Arc<SlidingWindowLimiter>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogBackend>, config: AppConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
            limiter: Arc::new(SlidingWindowLimiter::new()),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
