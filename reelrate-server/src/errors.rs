use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reelrate_core::CatalogError;
use serde_json::json;
use std::fmt;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    /// Extra detail attached only when the deployment is configured to
    /// expose internals (development mode).
    pub detail: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Map a storage error to a response.
    ///
    /// Data-access failures always log the full cause; the response body
    /// carries it only when `expose_internal` is set, otherwise the client
    /// sees an opaque message plus the status code.
    pub fn from_catalog(err: CatalogError, expose_internal: bool) -> Self {
        match err {
            CatalogError::NotFound(msg) => Self::not_found(msg),
            CatalogError::Validation(msg) => Self::bad_request(msg),
            CatalogError::Conflict(msg) => Self::conflict(msg),
            CatalogError::Database(msg) => {
                error!("Data access error: {}", msg);
                let mut app_err = Self::internal("internal server error");
                if expose_internal {
                    app_err.detail = Some(msg);
                }
                app_err
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self.detail {
            Some(detail) => Json(json!({
                "error": {
                    "message": self.message,
                    "status": self.status.as_u16(),
                    "detail": detail,
                }
            })),
            None => Json(json!({
                "error": {
                    "message": self.message,
                    "status": self.status.as_u16(),
                }
            })),
        };

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_are_opaque_in_production() {
        let err = AppError::from_catalog(
            CatalogError::Database("connection refused at 10.0.0.3".into()),
            false,
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "internal server error");
        assert!(err.detail.is_none());
    }

    #[test]
    fn database_errors_carry_detail_in_development() {
        let err = AppError::from_catalog(
            CatalogError::Database("connection refused".into()),
            true,
        );
        assert_eq!(err.detail.as_deref(), Some("connection refused"));
    }

    #[test]
    fn not_found_maps_to_404_regardless_of_mode() {
        let err = AppError::from_catalog(CatalogError::NotFound("movie x".into()), false);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "movie x");
    }
}
