use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::{fmt, str::FromStr, time::Duration};
use tracing::info;

use crate::database::ports::{CatalogBackend, MoviesRepository, RatingsRepository};
use crate::database::repositories::{
    movies::PostgresMoviesRepository, ratings::PostgresRatingsRepository,
};
use crate::error::{CatalogError, Result};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    movies: PostgresMoviesRepository,
    ratings: PostgresRatingsRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        // Pool sizing from environment with small-service defaults.
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);
        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(2);

        let connect_options = PgConnectOptions::from_str(connection_string)
            .map_err(|e| CatalogError::Database(format!("Invalid database URL: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(10))
            .max_lifetime(Duration::from_secs(1800))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| CatalogError::Database(format!("Database connection failed: {}", e)))?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool, for callers that manage their own connection
    /// settings.
    pub fn from_pool(pool: PgPool) -> Self {
        let movies = PostgresMoviesRepository::new(pool.clone());
        let ratings = PostgresRatingsRepository::new(pool.clone());
        PostgresDatabase {
            pool,
            movies,
            ratings,
        }
    }

    /// Create the movies/ratings tables and the indexes the listing and
    /// aggregation queries rely on. Idempotent.
    pub async fn initialize_schema(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                id UUID PRIMARY KEY,
                title TEXT NOT NULL,
                genre TEXT,
                year INTEGER,
                description TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ratings (
                id UUID PRIMARY KEY,
                movie_id UUID NOT NULL REFERENCES movies(id) ON DELETE CASCADE,
                score DOUBLE PRECISION NOT NULL CHECK (score >= 0 AND score <= 5),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_ratings_movie_id ON ratings(movie_id)",
            "CREATE INDEX IF NOT EXISTS idx_movies_year ON movies(year)",
            "CREATE INDEX IF NOT EXISTS idx_movies_genre_lower ON movies(LOWER(genre))",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    CatalogError::Database(format!("Schema initialization failed: {}", e))
                })?;
        }

        info!("Database schema initialized");
        Ok(())
    }

    /// Cheap connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Database(format!("Database ping failed: {}", e)))?;
        Ok(())
    }
}

impl CatalogBackend for PostgresDatabase {
    fn movies(&self) -> &dyn MoviesRepository {
        &self.movies
    }

    fn ratings(&self) -> &dyn RatingsRepository {
        &self.ratings
    }
}
