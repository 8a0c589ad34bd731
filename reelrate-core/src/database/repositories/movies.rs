use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::database::ports::MoviesRepository;
use crate::error::{CatalogError, Result};
use reelrate_model::{Movie, MovieFilter, MovieId, MoviePage, NewMovie, UpdateMovie};

const MOVIE_COLUMNS: &str = "id, title, genre, year, description, created_at, updated_at";

/// PostgreSQL-backed implementation of the `MoviesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresMoviesRepository {
    pool: PgPool,
}

impl PostgresMoviesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MoviesRepository for PostgresMoviesRepository {
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie> {
        let movie = movie.validated()?;
        let now = Utc::now();
        let id = MovieId::new();

        let created = sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (id, title, genre, year, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(movie.year)
        .bind(&movie.description)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to create movie: {}", e)))?;

        info!("Created movie: {} ({})", created.title, created.id);
        Ok(created)
    }

    async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to get movie: {}", e)))
    }

    async fn list_movies(&self, filter: &MovieFilter) -> Result<MoviePage> {
        // Substring genre match at the database; pagination via LIMIT/OFFSET.
        // Byte-order collation on title keeps ordering independent of the
        // server locale.
        let movies = sqlx::query_as::<_, Movie>(&format!(
            r#"
            SELECT {MOVIE_COLUMNS} FROM movies
            WHERE ($1::text IS NULL OR genre ILIKE '%' || $1 || '%')
              AND ($2::integer IS NULL OR year = $2)
            ORDER BY title COLLATE "C" ASC, id ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.genre.as_deref().map(super::escape_like))
        .bind(filter.year)
        .bind(filter.limit)
        .bind(filter.offset())
        .fetch_all(self.pool())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to list movies: {}", e)))?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM movies
            WHERE ($1::text IS NULL OR genre ILIKE '%' || $1 || '%')
              AND ($2::integer IS NULL OR year = $2)
            "#,
        )
        .bind(filter.genre.as_deref().map(super::escape_like))
        .bind(filter.year)
        .fetch_one(self.pool())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to count movies: {}", e)))?;

        Ok(MoviePage {
            movies,
            total,
            page: filter.page,
            limit: filter.limit,
        })
    }

    async fn update_movie(&self, id: MovieId, update: UpdateMovie) -> Result<Option<Movie>> {
        if update.is_empty() {
            return self.get_movie(id).await;
        }
        if let Some(title) = &update.title
            && title.trim().is_empty()
        {
            return Err(CatalogError::Validation("title must not be empty".into()));
        }

        let updated = sqlx::query_as::<_, Movie>(&format!(
            r#"
            UPDATE movies SET
                title = COALESCE($2, title),
                genre = COALESCE($3, genre),
                year = COALESCE($4, year),
                description = COALESCE($5, description),
                updated_at = $6
            WHERE id = $1
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.title.as_ref().map(|t| t.trim().to_string()))
        .bind(&update.genre)
        .bind(update.year)
        .bind(&update.description)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to update movie: {}", e)))?;

        if let Some(movie) = &updated {
            info!("Updated movie: {} ({})", movie.title, movie.id);
        }
        Ok(updated)
    }

    async fn delete_movie(&self, id: MovieId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CatalogError::Database(format!("Failed to delete movie: {}", e)))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted movie: {}", id);
        }
        Ok(deleted)
    }
}
