use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::errors::{AppError, AppResult};
use reelrate_model::{MovieFilter, MovieId, NewMovie, UpdateMovie};

/// Listing query parameters as strings; unparseable numbers fall back to
/// defaults rather than rejecting the request.
#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    pub genre: Option<String>,
    pub year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl MovieListQuery {
    fn into_filter(self) -> MovieFilter {
        MovieFilter::new(
            self.genre,
            self.year.and_then(|y| y.trim().parse::<i32>().ok()),
            self.page.and_then(|p| p.trim().parse::<i64>().ok()),
            self.limit.and_then(|l| l.trim().parse::<i64>().ok()),
        )
    }
}

pub async fn list_movies_handler(
    State(state): State<AppState>,
    Query(query): Query<MovieListQuery>,
) -> AppResult<Json<Value>> {
    let filter = query.into_filter();
    info!(
        "Listing movies (genre={:?}, year={:?}, page={}, limit={})",
        filter.genre, filter.year, filter.page, filter.limit
    );

    let page = state
        .catalog
        .movies()
        .list_movies(&filter)
        .await
        .map_err(|e| AppError::from_catalog(e, state.config.expose_internal_errors))?;

    Ok(Json(json!({
        "status": "success",
        "movies": page.movies,
        "total": page.total,
        "page": page.page,
        "limit": page.limit,
        "totalPages": page.total_pages(),
    })))
}

pub async fn movie_details_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let movie = state
        .catalog
        .movies()
        .get_movie(MovieId(id))
        .await
        .map_err(|e| AppError::from_catalog(e, state.config.expose_internal_errors))?
        .ok_or_else(|| AppError::not_found(format!("movie {} not found", id)))?;

    Ok(Json(json!({
        "status": "success",
        "movie": movie,
    })))
}

pub async fn create_movie_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewMovie>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let movie = state
        .catalog
        .movies()
        .create_movie(payload)
        .await
        .map_err(|e| AppError::from_catalog(e, state.config.expose_internal_errors))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "movie": movie,
        })),
    ))
}

pub async fn update_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMovie>,
) -> AppResult<Json<Value>> {
    let movie = state
        .catalog
        .movies()
        .update_movie(MovieId(id), payload)
        .await
        .map_err(|e| AppError::from_catalog(e, state.config.expose_internal_errors))?
        .ok_or_else(|| AppError::not_found(format!("movie {} not found", id)))?;

    Ok(Json(json!({
        "status": "success",
        "movie": movie,
    })))
}

pub async fn delete_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let deleted = state
        .catalog
        .movies()
        .delete_movie(MovieId(id))
        .await
        .map_err(|e| AppError::from_catalog(e, state.config.expose_internal_errors))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("movie {} not found", id)))
    }
}
