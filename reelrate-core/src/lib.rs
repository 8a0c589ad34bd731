//! # reelrate-core
//!
//! The rating aggregation core and storage layer of the reelrate service.
//!
//! The interesting behavior lives in [`aggregate`]: given joined
//! (movie, score) rows it computes per-movie averages, applies the
//! minimum-vote threshold, and ranks with a deterministic three-level
//! tie-break. Storage is behind the [`database::ports`] traits with a
//! PostgreSQL implementation and an in-memory one used by tests.

pub mod aggregate;
pub mod database;
pub mod error;

pub use aggregate::{RatedMovie, TopRatedParams, genre_matches, rank_top_rated};
pub use database::memory::MemoryCatalog;
pub use database::ports::{CatalogBackend, MoviesRepository, RatingsRepository};
pub use database::postgres::PostgresDatabase;
pub use error::{CatalogError, Result};
