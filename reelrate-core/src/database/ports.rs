//! Storage ports. The server talks to a [`CatalogBackend`] and never to a
//! concrete store, so the PostgreSQL and in-memory implementations are
//! interchangeable.

use async_trait::async_trait;

use crate::aggregate::RatedMovie;
use crate::error::Result;
use reelrate_model::{Movie, MovieFilter, MovieId, MoviePage, NewMovie, Rating, Score, UpdateMovie};

#[async_trait]
pub trait MoviesRepository: Send + Sync {
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie>;

    async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>>;

    /// Filtered, paginated listing. Ordering is by title (byte order on the
    /// stored casing) with id as a stable final key.
    async fn list_movies(&self, filter: &MovieFilter) -> Result<MoviePage>;

    /// Partial update; `None` fields keep their stored value. Returns the
    /// updated movie, or `None` when the id does not exist.
    async fn update_movie(&self, id: MovieId, update: UpdateMovie) -> Result<Option<Movie>>;

    /// Returns whether a row was deleted. Cascades to the movie's ratings.
    async fn delete_movie(&self, id: MovieId) -> Result<bool>;
}

#[async_trait]
pub trait RatingsRepository: Send + Sync {
    /// Append a rating for an existing movie. Fails with `NotFound` when
    /// the movie reference does not resolve.
    async fn create_rating(&self, movie_id: MovieId, score: Score) -> Result<Rating>;

    async fn list_ratings(&self, movie_id: MovieId) -> Result<Vec<Rating>>;

    /// Inner-join of ratings to movies, optionally restricted to movies
    /// whose genre matches `genre_filter` as a case-insensitive substring.
    /// Ratings with unresolvable movie references are dropped by the join.
    async fn rated_movies(&self, genre_filter: Option<&str>) -> Result<Vec<RatedMovie>>;
}

/// A storage backend bundling the per-concern repositories.
pub trait CatalogBackend: Send + Sync {
    fn movies(&self) -> &dyn MoviesRepository;
    fn ratings(&self) -> &dyn RatingsRepository;
}
