use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::jwt::validate_token;
use crate::AppState;
use crate::errors::AppError;

/// Gate for mutation routes: requires a valid `Bearer` access token and
/// stores the decoded claims in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)?;
    let claims = validate_token(&state.config.jwt_secret, &token)
        .map_err(|_| AppError::unauthorized("invalid or expired token"))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Result<String, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("missing authorization header"))?;

    header_value
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| AppError::unauthorized("authorization header is not a bearer token"))
}
