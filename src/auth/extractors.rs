use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::{
    auth::{dto::PublicUser, services::resolve_current_user},
    error::AuthError,
    state::AppState,
};

/// Raw token from an `Authorization: Bearer <token>` header.
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                debug!("missing Authorization header");
                AuthError::InvalidToken
            })?;

        // Scheme is case-insensitive.
        let (scheme, token) = header.split_once(' ').ok_or(AuthError::InvalidToken)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            debug!(scheme = %scheme, "unsupported auth scheme");
            return Err(AuthError::InvalidToken);
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(BearerToken(token.to_string()))
    }
}

/// The user the request's bearer token resolves to.
pub struct CurrentUser(pub PublicUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let user = resolve_current_user(&state.users, &state.keys, &token).await?;
        Ok(CurrentUser(user))
    }
}
