use axum::{
    Router,
    handler::Handler,
    middleware,
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    AppState,
    auth::middleware::auth_middleware,
    handlers::{health, movies, ratings, top_rated},
    middleware::rate_limit::rate_limit_middleware,
};

/// Create the main API router with all versions
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new().nest("/api/v1", create_v1_router(state))
}

/// Create all v1 API routes.
///
/// Reads are public; mutations on the movie catalog carry the token gate
/// as a per-handler layer. The rate limiter wraps the whole version.
fn create_v1_router(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route("/movies/top-rated", get(top_rated::top_rated_handler))
        .route(
            "/movies",
            get(movies::list_movies_handler)
                .post(movies::create_movie_handler.layer(auth.clone())),
        )
        .route(
            "/movies/{id}",
            get(movies::movie_details_handler)
                .put(movies::update_movie_handler.layer(auth.clone()))
                .delete(movies::delete_movie_handler.layer(auth)),
        )
        .route(
            "/movies/{id}/ratings",
            get(ratings::list_ratings_handler).post(ratings::create_rating_handler),
        )
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

/// Assemble the full application: health probe, versioned API, static
/// chart frontend, and the cross-cutting layers.
pub fn build_app(state: AppState) -> Router {
    let static_files =
        ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(create_api_router(state.clone()))
        .fallback_service(static_files)
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.cors_allowed_origins;
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect::<Vec<_>>(),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
