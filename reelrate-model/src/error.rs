use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("score {0} outside the 0..=5 range")]
    InvalidScore(f64),

    #[error("invalid title: {0}")]
    InvalidTitle(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
