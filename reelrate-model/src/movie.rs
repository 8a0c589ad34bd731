use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::MovieId;

/// A movie as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Free-form genre field; may carry several labels ("Sci-Fi Action").
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewMovie {
    /// Reject blank titles; trims surrounding whitespace from text fields.
    pub fn validated(mut self) -> Result<Self> {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            return Err(ModelError::InvalidTitle("title must not be empty".into()));
        }
        self.genre = self.genre.and_then(non_blank);
        self.description = self.description.and_then(non_blank);
        Ok(self)
    }
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateMovie {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre.is_none()
            && self.year.is_none()
            && self.description.is_none()
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Listing filter with pagination, already normalized.
///
/// `page` starts at 1; `limit` is clamped to `1..=100`. Out-of-range or
/// unparseable inputs fall back to the defaults rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFilter {
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub page: i64,
    pub limit: i64,
}

impl MovieFilter {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(genre: Option<String>, year: Option<i32>, page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            genre: genre.and_then(non_blank),
            year,
            page: page.filter(|p| *p >= 1).unwrap_or(Self::DEFAULT_PAGE),
            limit: limit
                .filter(|l| *l >= 1)
                .unwrap_or(Self::DEFAULT_LIMIT)
                .min(Self::MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        // Saturate so absurdly large page numbers yield an empty page
        // instead of overflowing.
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for MovieFilter {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

/// One page of movies plus the totals needed to render pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl MoviePage {
    /// `ceil(total / limit)`; zero when the collection is empty.
    pub fn total_pages(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            (self.total + self.limit - 1) / self.limit
        }
    }
}
