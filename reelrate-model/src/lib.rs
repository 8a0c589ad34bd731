//! Domain types shared by the reelrate store, aggregation core, and server.

pub mod error;
pub mod ids;
pub mod movie;
pub mod rating;
pub mod top_rated;

pub use error::{ModelError, Result};
pub use ids::{MovieId, RatingId};
pub use movie::{Movie, MovieFilter, MoviePage, NewMovie, UpdateMovie};
pub use rating::{NewRating, Rating, Score};
pub use top_rated::TopRatedEntry;
