use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::{MovieId, RatingId};

/// A validated rating score in the inclusive range `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ModelError::InvalidScore(value));
        }
        Ok(Score(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self> {
        Score::new(value)
    }
}

/// A single vote against a movie. Append-only: ratings are never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rating {
    pub id: RatingId,
    pub movie_id: MovieId,
    pub score: Score,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting a rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRating {
    pub score: f64,
}

impl NewRating {
    pub fn score(&self) -> Result<Score> {
        Score::new(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds() {
        assert!(Score::new(0.0).is_ok());
        assert!(Score::new(5.0).is_ok());
        assert!(Score::new(4.5).is_ok());
        assert!(Score::new(-0.1).is_err());
        assert!(Score::new(5.1).is_err());
        assert!(Score::new(f64::NAN).is_err());
        assert!(Score::new(f64::INFINITY).is_err());
    }

    #[test]
    fn score_serializes_as_bare_number() {
        let json = serde_json::to_string(&Score::new(4.5).unwrap()).unwrap();
        assert_eq!(json, "4.5");
    }
}
