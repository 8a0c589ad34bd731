//! Per-client rate limiting for the API routes.
//!
//! A sliding-window limiter keyed by client address. State is in-process;
//! a multi-instance deployment would need a shared store behind the same
//! interface.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::AppState;

/// Sliding-window request counter.
#[derive(Debug, Default)]
pub struct SlidingWindowLimiter {
    requests: tokio::sync::RwLock<HashMap<String, Vec<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one request for `key` and report whether it fits the limit.
    pub async fn check_limit(&self, key: &str, limit: u32, window: Duration) -> bool {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        let timestamps = requests.entry(key.to_string()).or_default();
        timestamps.retain(|&t| now.duration_since(t) < window);

        if timestamps.len() < limit as usize {
            timestamps.push(now);
            true
        } else {
            false
        }
    }

    /// Drop entries whose every timestamp is older than `max_idle`. Called
    /// periodically so the per-client map cannot grow without bound.
    pub async fn cleanup(&self, max_idle: Duration) {
        let mut requests = self.requests.write().await;
        let now = Instant::now();
        requests.retain(|_, timestamps| timestamps.iter().any(|&t| now.duration_since(t) < max_idle));
    }
}

/// Throttle middleware applied to the API router.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.rate_limit_enabled {
        return next.run(request).await;
    }

    let client_id = extract_client_id(&request);
    let allowed = state
        .limiter
        .check_limit(
            &client_id,
            state.config.rate_limit_max_requests,
            state.config.rate_limit_window,
        )
        .await;

    if allowed {
        next.run(request).await
    } else {
        warn!("Rate limit exceeded for client: {}", client_id);
        rate_limit_exceeded_response(state.config.rate_limit_window.as_secs())
    }
}

/// Extract client identifier from request
fn extract_client_id(request: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return format!("ip:{}", addr.ip());
    }

    // Behind a proxy the peer address is the proxy's; use the forwarded header.
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(ip) = forwarded.to_str()
    {
        return format!("ip:{}", ip.split(',').next().unwrap_or("unknown").trim());
    }

    "unknown".to_string()
}

fn rate_limit_exceeded_response(window_seconds: u64) -> Response {
    let retry_after = window_seconds.to_string();

    (
        StatusCode::TOO_MANY_REQUESTS,
        [("retry-after", retry_after.as_str())],
        axum::Json(serde_json::json!({
            "error": "rate_limit_exceeded",
            "message": format!("Too many requests. Please try again in {} seconds.", window_seconds),
            "retry_after": window_seconds,
        })),
    )
        .into_response()
}
