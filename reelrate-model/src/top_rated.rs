use serde::{Deserialize, Serialize};

use crate::ids::MovieId;

/// One ranked movie in a top-rated response. Derived per query, never stored.
///
/// Field names follow the public wire format, hence the camelCase renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRatedEntry {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    pub genre: Option<String>,
    /// Arithmetic mean of contributing scores, rounded to 3 decimal places.
    /// Ranking happens on the unrounded mean before this value is produced.
    #[serde(rename = "avgRating")]
    pub avg_rating: f64,
    #[serde(rename = "voteCount")]
    pub vote_count: u64,
}
