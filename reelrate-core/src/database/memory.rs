//! In-memory catalog backend.
//!
//! Mirrors the PostgreSQL repositories' observable behavior (ordering,
//! join and filter semantics) so server tests and demos can run without a
//! database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::aggregate::{RatedMovie, genre_matches};
use crate::database::ports::{CatalogBackend, MoviesRepository, RatingsRepository};
use crate::error::{CatalogError, Result};
use reelrate_model::{
    Movie, MovieFilter, MovieId, MoviePage, NewMovie, Rating, RatingId, Score, UpdateMovie,
};

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    movies: RwLock<HashMap<MovieId, Movie>>,
    ratings: RwLock<Vec<Rating>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rating without checking the movie reference. Lets tests
    /// exercise the join's silent drop of orphaned ratings, which the
    /// Postgres schema forbids via its foreign key.
    pub async fn insert_orphan_rating(&self, movie_id: MovieId, score: Score) {
        self.ratings.write().await.push(Rating {
            id: RatingId::new(),
            movie_id,
            score,
            created_at: Utc::now(),
        });
    }
}

#[async_trait]
impl MoviesRepository for MemoryCatalog {
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie> {
        let movie = movie.validated()?;
        let now = Utc::now();
        let created = Movie {
            id: MovieId::new(),
            title: movie.title,
            genre: movie.genre,
            year: movie.year,
            description: movie.description,
            created_at: now,
            updated_at: now,
        };
        self.movies.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        Ok(self.movies.read().await.get(&id).cloned())
    }

    async fn list_movies(&self, filter: &MovieFilter) -> Result<MoviePage> {
        let movies = self.movies.read().await;
        let mut matching: Vec<Movie> = movies
            .values()
            .filter(|m| match &filter.genre {
                Some(g) => genre_matches(m.genre.as_deref(), g),
                None => true,
            })
            .filter(|m| match filter.year {
                Some(year) => m.year == Some(year),
                None => true,
            })
            .cloned()
            .collect();

        // Same order the Postgres query produces: title byte order, id.
        matching.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));

        let total = matching.len() as i64;
        let page: Vec<Movie> = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit as usize)
            .collect();

        Ok(MoviePage {
            movies: page,
            total,
            page: filter.page,
            limit: filter.limit,
        })
    }

    async fn update_movie(&self, id: MovieId, update: UpdateMovie) -> Result<Option<Movie>> {
        // No-op updates return the stored row untouched, as Postgres does.
        if update.is_empty() {
            return self.get_movie(id).await;
        }
        if let Some(title) = &update.title
            && title.trim().is_empty()
        {
            return Err(CatalogError::Validation("title must not be empty".into()));
        }

        let mut movies = self.movies.write().await;
        let Some(movie) = movies.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            movie.title = title.trim().to_string();
        }
        if let Some(genre) = update.genre {
            movie.genre = Some(genre);
        }
        if let Some(year) = update.year {
            movie.year = Some(year);
        }
        if let Some(description) = update.description {
            movie.description = Some(description);
        }
        movie.updated_at = Utc::now();
        Ok(Some(movie.clone()))
    }

    async fn delete_movie(&self, id: MovieId) -> Result<bool> {
        let removed = self.movies.write().await.remove(&id).is_some();
        if removed {
            // Same cascade the Postgres foreign key performs.
            self.ratings.write().await.retain(|r| r.movie_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl RatingsRepository for MemoryCatalog {
    async fn create_rating(&self, movie_id: MovieId, score: Score) -> Result<Rating> {
        if !self.movies.read().await.contains_key(&movie_id) {
            return Err(CatalogError::NotFound(format!(
                "movie {} does not exist",
                movie_id
            )));
        }
        let rating = Rating {
            id: RatingId::new(),
            movie_id,
            score,
            created_at: Utc::now(),
        };
        self.ratings.write().await.push(rating.clone());
        Ok(rating)
    }

    async fn list_ratings(&self, movie_id: MovieId) -> Result<Vec<Rating>> {
        let ratings = self.ratings.read().await;
        let mut matching: Vec<Rating> = ratings
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn rated_movies(&self, genre_filter: Option<&str>) -> Result<Vec<RatedMovie>> {
        let movies = self.movies.read().await;
        let ratings = self.ratings.read().await;

        Ok(ratings
            .iter()
            .filter_map(|rating| {
                // Inner join: orphaned ratings are dropped silently.
                let movie = movies.get(&rating.movie_id)?;
                if let Some(filter) = genre_filter
                    && !genre_matches(movie.genre.as_deref(), filter)
                {
                    return None;
                }
                Some(RatedMovie {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    genre: movie.genre.clone(),
                    score: rating.score.value(),
                })
            })
            .collect())
    }
}

impl CatalogBackend for MemoryCatalog {
    fn movies(&self) -> &dyn MoviesRepository {
        self
    }

    fn ratings(&self) -> &dyn RatingsRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{TopRatedParams, rank_top_rated};

    async fn seed_movie(catalog: &MemoryCatalog, title: &str, genre: Option<&str>) -> MovieId {
        catalog
            .create_movie(NewMovie {
                title: title.into(),
                genre: genre.map(str::to_string),
                year: Some(2020),
                description: None,
            })
            .await
            .expect("create movie")
            .id
    }

    async fn rate(catalog: &MemoryCatalog, id: MovieId, scores: &[f64]) {
        for score in scores {
            catalog
                .create_rating(id, Score::new(*score).unwrap())
                .await
                .expect("create rating");
        }
    }

    #[tokio::test]
    async fn join_drops_orphaned_ratings() {
        let catalog = MemoryCatalog::new();
        let id = seed_movie(&catalog, "Kept", None).await;
        rate(&catalog, id, &[4.0, 4.0, 4.0]).await;
        catalog
            .insert_orphan_rating(MovieId::new(), Score::new(5.0).unwrap())
            .await;

        let rows = catalog.rated_movies(None).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.movie_id == id));
    }

    #[tokio::test]
    async fn genre_filter_applies_to_joined_movie() {
        let catalog = MemoryCatalog::new();
        let action = seed_movie(&catalog, "Boom", Some("Sci-Fi Action")).await;
        let drama = seed_movie(&catalog, "Weep", Some("Drama")).await;
        rate(&catalog, action, &[5.0, 5.0, 5.0]).await;
        rate(&catalog, drama, &[4.0, 4.0, 4.0]).await;

        let rows = catalog.rated_movies(Some("action")).await.unwrap();
        assert!(rows.iter().all(|r| r.movie_id == action));

        let ranked = rank_top_rated(&rows, &TopRatedParams::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Boom");
    }

    #[tokio::test]
    async fn delete_cascades_to_ratings() {
        let catalog = MemoryCatalog::new();
        let id = seed_movie(&catalog, "Gone", None).await;
        rate(&catalog, id, &[3.0, 3.0]).await;

        assert!(catalog.delete_movie(id).await.unwrap());
        assert!(catalog.list_ratings(id).await.unwrap().is_empty());
        assert!(catalog.rated_movies(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_paginates_in_title_order() {
        let catalog = MemoryCatalog::new();
        for title in ["Charlie", "alpha", "Bravo", "Alpha"] {
            seed_movie(&catalog, title, Some("Drama")).await;
        }

        let page = catalog
            .list_movies(&MovieFilter::new(None, None, Some(1), Some(3)))
            .await
            .unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages(), 2);
        let titles: Vec<&str> = page.movies.iter().map(|m| m.title.as_str()).collect();
        // Byte order: uppercase before lowercase.
        assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);

        let page2 = catalog
            .list_movies(&MovieFilter::new(None, None, Some(2), Some(3)))
            .await
            .unwrap();
        assert_eq!(page2.movies.len(), 1);
        assert_eq!(page2.movies[0].title, "alpha");
    }

    #[tokio::test]
    async fn empty_update_is_a_no_op() {
        let catalog = MemoryCatalog::new();
        let id = seed_movie(&catalog, "Still", None).await;
        let before = catalog.get_movie(id).await.unwrap().unwrap();

        let after = catalog
            .update_movie(id, UpdateMovie::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after, before, "updated_at must not move");
    }

    #[tokio::test]
    async fn rating_unknown_movie_is_not_found() {
        let catalog = MemoryCatalog::new();
        let err = catalog
            .create_rating(MovieId::new(), Score::new(4.0).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
