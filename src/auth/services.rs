//! Credential and token operations, free of HTTP concerns.

use tracing::{error, info, warn};

use crate::{
    auth::{
        dto::{HealthResponse, PublicUser},
        jwt::{AccessToken, JwtKeys},
        password::{hash_password_async, verify_password_async},
        repo::UserStore,
    },
    error::{AuthError, AuthResult},
};

/// Register a new user and return its public projection.
pub async fn register(
    store: &UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> AuthResult<PublicUser> {
    if username.is_empty() {
        return Err(AuthError::Validation("Username must not be empty".into()));
    }

    // Cheap early exit; the authoritative check happens inside `create`.
    if store.contains(username).await {
        warn!(username = %username, "username already registered");
        return Err(AuthError::DuplicateUser);
    }

    let hash = hash_password_async(password.to_string()).await?;
    let user = store.create(username, email, hash).await.map_err(|e| {
        if matches!(e, AuthError::DuplicateUser) {
            warn!(username = %username, "username registered concurrently");
        }
        e
    })?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user.into())
}

/// Exchange a username and password for an access token.
pub async fn authenticate(
    store: &UserStore,
    keys: &JwtKeys,
    username: &str,
    password: &str,
) -> AuthResult<AccessToken> {
    let Some(user) = store.find_by_username(username).await else {
        warn!(username = %username, "login unknown username");
        return Err(AuthError::InvalidCredentials);
    };

    let ok = verify_password_async(password.to_string(), user.password_hash.clone())
        .await
        .map_err(|e| {
            error!(error = %e, user_id = user.id, "verify_password failed");
            AuthError::Internal(e)
        })?;
    if !ok {
        warn!(username = %username, user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = keys.sign(&user.username)?;
    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(token)
}

/// Resolve the user a bearer token speaks for.
pub async fn resolve_current_user(
    store: &UserStore,
    keys: &JwtKeys,
    token: &str,
) -> AuthResult<PublicUser> {
    let claims = keys.verify(token)?;
    match store.find_by_username(&claims.sub).await {
        Some(user) => Ok(user.into()),
        None => {
            warn!(username = %claims.sub, "token subject has no user");
            Err(AuthError::UserNotFound)
        }
    }
}

pub fn health_check() -> HealthResponse {
    HealthResponse {
        status: "healthy".into(),
    }
}
