use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<reelrate_model::ModelError> for CatalogError {
    fn from(err: reelrate_model::ModelError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
