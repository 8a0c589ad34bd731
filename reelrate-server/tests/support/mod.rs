use std::sync::Arc;

use anyhow::Result;
use axum_test::TestServer;
use uuid::Uuid;

use reelrate_core::{MemoryCatalog, MoviesRepository, RatingsRepository};
use reelrate_model::{MovieId, NewMovie, Score};
use reelrate_server::{
    AppState,
    auth::jwt::generate_access_token,
    config::AppConfig,
    routes::build_app,
};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// Helpers are shared across test binaries; not every binary uses all of them.
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub catalog: Arc<MemoryCatalog>,
    pub state: AppState,
}

#[allow(unused)]
pub fn build_test_app() -> Result<TestApp> {
    build_test_app_with_config(AppConfig::for_tests(TEST_JWT_SECRET))
}

#[allow(unused)]
pub fn build_test_app_with_config(config: AppConfig) -> Result<TestApp> {
    let catalog = Arc::new(MemoryCatalog::new());
    let state = AppState::new(catalog.clone(), config);
    let server = TestServer::new(build_app(state.clone()))?;
    Ok(TestApp {
        server,
        catalog,
        state,
    })
}

#[allow(unused)]
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[allow(unused)]
pub fn access_token() -> String {
    generate_access_token(TEST_JWT_SECRET, Uuid::new_v4(), 3600).expect("token signs")
}

#[allow(unused)]
pub async fn seed_movie(
    catalog: &MemoryCatalog,
    title: &str,
    genre: Option<&str>,
    year: Option<i32>,
) -> MovieId {
    catalog
        .create_movie(NewMovie {
            title: title.into(),
            genre: genre.map(str::to_string),
            year,
            description: None,
        })
        .await
        .expect("seed movie")
        .id
}

#[allow(unused)]
pub async fn rate_movie(catalog: &MemoryCatalog, id: MovieId, scores: &[f64]) {
    for score in scores {
        catalog
            .create_rating(id, Score::new(*score).expect("valid score"))
            .await
            .expect("seed rating");
    }
}
