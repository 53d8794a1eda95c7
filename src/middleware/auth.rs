use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::identity::TokenClaims;
use crate::state::AppState;

/// Authenticated caller context extracted from a verified bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
}

impl From<TokenClaims> for AuthUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            uid: claims.uid,
            email: claims.email,
        }
    }
}

/// Authentication middleware for protected routes: extracts the bearer
/// credential and delegates verification to the identity service.
///
/// Outcomes: 401 when no credential is presented, 403 when the service
/// reports it invalid, 500 on any other service failure.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let claims = state.identity.verify_token(&token).await?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Take the last whitespace-separated token of the Authorization header.
/// Tolerates, but does not require, a "Bearer " prefix.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("No authorization token provided"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("No authorization token provided"))?;

    auth_str
        .split_whitespace()
        .last()
        .map(String::from)
        .ok_or_else(|| ApiError::unauthorized("No authorization token provided"))
}
