pub mod health;
pub mod movies;
pub mod ratings;
pub mod top_rated;
