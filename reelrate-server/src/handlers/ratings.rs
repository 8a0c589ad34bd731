use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;
use crate::errors::{AppError, AppResult};
use reelrate_model::{MovieId, NewRating};

pub async fn list_ratings_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let movie_id = MovieId(id);
    let expose = state.config.expose_internal_errors;

    // Distinguish "movie unknown" (404) from "movie with no ratings" (empty list).
    state
        .catalog
        .movies()
        .get_movie(movie_id)
        .await
        .map_err(|e| AppError::from_catalog(e, expose))?
        .ok_or_else(|| AppError::not_found(format!("movie {} not found", id)))?;

    let ratings = state
        .catalog
        .ratings()
        .list_ratings(movie_id)
        .await
        .map_err(|e| AppError::from_catalog(e, expose))?;

    let count = ratings.len();
    Ok(Json(json!({
        "status": "success",
        "ratings": ratings,
        "count": count,
    })))
}

pub async fn create_rating_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewRating>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let score = payload
        .score()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let rating = state
        .catalog
        .ratings()
        .create_rating(MovieId(id), score)
        .await
        .map_err(|e| AppError::from_catalog(e, state.config.expose_internal_errors))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "rating": rating,
        })),
    ))
}
