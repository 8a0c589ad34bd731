//! Top-rated ranking: grouping, averaging, thresholding, tie-breaking.
//!
//! Stores hand this module pre-joined (movie, score) rows; everything that
//! determines the observable ordering happens here so both the PostgreSQL
//! and in-memory backends produce identical results.

use std::collections::HashMap;

use reelrate_model::{MovieId, TopRatedEntry};

/// One joined (rating, movie) row, the input unit of the ranking pass.
///
/// Ratings whose movie reference does not resolve never reach this type;
/// the stores drop them during the join.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RatedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub genre: Option<String>,
    pub score: f64,
}

/// Normalized top-rated query parameters.
///
/// Construction via [`TopRatedParams::from_raw`] never fails: malformed or
/// out-of-range inputs fall back to documented defaults instead of
/// surfacing as client errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopRatedParams {
    /// Case-insensitive substring filter on the movie's genre field.
    pub genre: Option<String>,
    pub min_votes: u64,
    pub limit: usize,
}

impl TopRatedParams {
    pub const DEFAULT_MIN_VOTES: u64 = 3;
    pub const MAX_MIN_VOTES: u64 = 100;
    pub const DEFAULT_LIMIT: usize = 10;
    pub const MAX_LIMIT: usize = 50;

    /// Normalize raw query-string inputs.
    ///
    /// Non-numeric, missing, and non-positive values take the default;
    /// values above the cap are clamped to it. A blank genre means no
    /// filter at all.
    pub fn from_raw(genre: Option<&str>, min_votes: Option<&str>, limit: Option<&str>) -> Self {
        let genre = genre
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);

        let min_votes = parse_positive(min_votes)
            .map(|v| v.min(Self::MAX_MIN_VOTES))
            .unwrap_or(Self::DEFAULT_MIN_VOTES);

        let limit = parse_positive(limit)
            .map(|v| (v as usize).min(Self::MAX_LIMIT))
            .unwrap_or(Self::DEFAULT_LIMIT);

        Self {
            genre,
            min_votes,
            limit,
        }
    }
}

impl Default for TopRatedParams {
    fn default() -> Self {
        Self::from_raw(None, None, None)
    }
}

fn parse_positive(input: Option<&str>) -> Option<u64> {
    // Parse wide and saturate so values past u64 still clamp to the caps
    // rather than degrading to the defaults.
    input
        .and_then(|s| s.trim().parse::<u128>().ok())
        .filter(|v| *v >= 1)
        .map(|v| u64::try_from(v).unwrap_or(u64::MAX))
}

/// Case-insensitive substring match on a movie's genre field.
///
/// A movie with genre "Action/Adventure" matches the filter "action".
/// Movies without a genre never match an active filter.
pub fn genre_matches(genre: Option<&str>, filter: &str) -> bool {
    match genre {
        Some(g) => g.to_lowercase().contains(&filter.to_lowercase()),
        None => false,
    }
}

struct Group {
    title: String,
    genre: Option<String>,
    sum: f64,
    count: u64,
}

/// Rank pre-filtered rows into at most `params.limit` entries.
///
/// Groups by movie, drops groups below the vote threshold, then sorts by
/// unrounded mean descending, vote count descending, title ascending
/// (byte-wise on the stored casing). Means are rounded to 3 decimal places
/// only when the final entries are materialized, so rounding can never
/// introduce ties that affect the order.
pub fn rank_top_rated(rows: &[RatedMovie], params: &TopRatedParams) -> Vec<TopRatedEntry> {
    let mut groups: HashMap<MovieId, Group> = HashMap::new();
    for row in rows {
        groups
            .entry(row.movie_id)
            .and_modify(|g| {
                g.sum += row.score;
                g.count += 1;
            })
            .or_insert_with(|| Group {
                title: row.title.clone(),
                genre: row.genre.clone(),
                sum: row.score,
                count: 1,
            });
    }

    let mut ranked: Vec<(MovieId, Group, f64)> = groups
        .into_iter()
        .filter(|(_, g)| g.count >= params.min_votes)
        .map(|(id, g)| {
            let mean = g.sum / g.count as f64;
            (id, g, mean)
        })
        .collect();

    ranked.sort_by(|(_, a, mean_a), (_, b, mean_b)| {
        mean_b
            .total_cmp(mean_a)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.title.cmp(&b.title))
    });

    ranked
        .into_iter()
        .take(params.limit)
        .map(|(movie_id, g, mean)| TopRatedEntry {
            movie_id,
            title: g.title,
            genre: g.genre,
            avg_rating: round3(mean),
            vote_count: g.count,
        })
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
