use std::time::Duration;

use anyhow::Result;
use axum::http::StatusCode;

#[path = "support/mod.rs"]
mod support;

use support::{TEST_JWT_SECRET, build_test_app_with_config};
use reelrate_server::config::AppConfig;

fn throttled_config() -> AppConfig {
    let mut config = AppConfig::for_tests(TEST_JWT_SECRET);
    config.rate_limit_enabled = true;
    config.rate_limit_max_requests = 3;
    config.rate_limit_window = Duration::from_secs(60);
    config
}

#[tokio::test]
async fn api_requests_beyond_the_window_limit_get_429() -> Result<()> {
    let app = build_test_app_with_config(throttled_config())?;

    for _ in 0..3 {
        app.server.get("/api/v1/movies").await.assert_status_ok();
    }

    let throttled = app.server.get("/api/v1/movies").await;
    throttled.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert!(
        throttled.headers().get("retry-after").is_some(),
        "throttled response advertises a retry window"
    );
    Ok(())
}

#[tokio::test]
async fn health_probe_is_not_throttled() -> Result<()> {
    let app = build_test_app_with_config(throttled_config())?;

    for _ in 0..10 {
        app.server.get("/health").await.assert_status_ok();
    }
    Ok(())
}

#[tokio::test]
async fn disabled_limiter_passes_everything() -> Result<()> {
    let app = build_test_app_with_config(AppConfig::for_tests(TEST_JWT_SECRET))?;

    for _ in 0..10 {
        app.server
            .get("/api/v1/movies/top-rated")
            .await
            .assert_status_ok();
    }
    Ok(())
}
