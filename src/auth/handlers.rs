use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    routing::{get, post},
    Form, Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{HealthResponse, PublicUser, RegisterRequest, TokenForm, TokenResponse},
        extractors::CurrentUser,
        services,
    },
    error::AuthResult,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<PublicUser>> {
    let Json(payload) = payload?;
    let user = services::register(
        &state.users,
        &payload.username,
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok(Json(user))
}

#[instrument(skip_all)]
pub async fn token(
    State(state): State<AppState>,
    form: Result<Form<TokenForm>, FormRejection>,
) -> AuthResult<Json<TokenResponse>> {
    let Form(form) = form?;
    let minted =
        services::authenticate(&state.users, &state.keys, &form.username, &form.password).await?;
    Ok(Json(TokenResponse::bearer(minted.token)))
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user)
}

pub async fn health() -> Json<HealthResponse> {
    Json(services::health_check())
}
