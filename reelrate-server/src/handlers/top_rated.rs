use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::errors::{AppError, AppResult};
use reelrate_core::{TopRatedParams, rank_top_rated};
use reelrate_model::TopRatedEntry;

/// Raw query parameters, kept as strings so malformed numbers degrade to
/// defaults instead of failing extraction with a 400.
#[derive(Debug, Deserialize)]
pub struct TopRatedQuery {
    pub genre: Option<String>,
    #[serde(rename = "minVotes")]
    pub min_votes: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopRatedResponse {
    pub data: Vec<TopRatedEntry>,
    pub meta: TopRatedMeta,
}

/// Echoes the effective parameters so callers can tell requested from
/// clamped values.
#[derive(Debug, Serialize)]
pub struct TopRatedMeta {
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub limit: usize,
    #[serde(rename = "minVotes")]
    pub min_votes: u64,
    pub genre: Option<String>,
}

pub async fn top_rated_handler(
    State(state): State<AppState>,
    Query(query): Query<TopRatedQuery>,
) -> AppResult<Json<TopRatedResponse>> {
    let params = TopRatedParams::from_raw(
        query.genre.as_deref(),
        query.min_votes.as_deref(),
        query.limit.as_deref(),
    );
    info!(
        "Computing top-rated movies (genre={:?}, min_votes={}, limit={})",
        params.genre, params.min_votes, params.limit
    );

    let rows = state
        .catalog
        .ratings()
        .rated_movies(params.genre.as_deref())
        .await
        .map_err(|e| AppError::from_catalog(e, state.config.expose_internal_errors))?;

    let data = rank_top_rated(&rows, &params);

    Ok(Json(TopRatedResponse {
        data,
        meta: TopRatedMeta {
            generated_at: Utc::now(),
            limit: params.limit,
            min_votes: params.min_votes,
            genre: params.genre,
        },
    }))
}
