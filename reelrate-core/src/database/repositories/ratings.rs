use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::aggregate::RatedMovie;
use crate::database::ports::RatingsRepository;
use crate::error::{CatalogError, Result};
use reelrate_model::{MovieId, Rating, RatingId, Score};

/// PostgreSQL-backed implementation of the `RatingsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresRatingsRepository {
    pool: PgPool,
}

impl PostgresRatingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RatingsRepository for PostgresRatingsRepository {
    async fn create_rating(&self, movie_id: MovieId, score: Score) -> Result<Rating> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (id, movie_id, score, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, movie_id, score, created_at
            "#,
        )
        .bind(RatingId::new())
        .bind(movie_id)
        .bind(score)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.is_foreign_key_violation()
            {
                return CatalogError::NotFound(format!("movie {} does not exist", movie_id));
            }
            CatalogError::Database(format!("Failed to create rating: {}", e))
        })?;

        info!("Recorded rating {} for movie {}", rating.id, movie_id);
        Ok(rating)
    }

    async fn list_ratings(&self, movie_id: MovieId) -> Result<Vec<Rating>> {
        sqlx::query_as::<_, Rating>(
            r#"
            SELECT id, movie_id, score, created_at
            FROM ratings
            WHERE movie_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(movie_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to list ratings: {}", e)))
    }

    async fn rated_movies(&self, genre_filter: Option<&str>) -> Result<Vec<RatedMovie>> {
        // Inner join drops ratings without a resolvable movie; the genre
        // filter applies to the joined movie, never to individual ratings.
        sqlx::query_as::<_, RatedMovie>(
            r#"
            SELECT m.id AS movie_id, m.title, m.genre, r.score
            FROM ratings r
            INNER JOIN movies m ON m.id = r.movie_id
            WHERE ($1::text IS NULL OR m.genre ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(genre_filter.map(super::escape_like))
        .fetch_all(self.pool())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to load rated movies: {}", e)))
    }
}
