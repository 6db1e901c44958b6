use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::user::{AuthResponse, CreateUser, LoginPayload, PublicUser},
    rest::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let Json(payload) = payload.map_err(|_| AppError::Validation("invalid body".to_string()))?;

    let user = state
        .auth
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(payload) = payload.map_err(|_| AppError::Validation("invalid body".to_string()))?;

    let response = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(response))
}

// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "logged out successfully" }))
}
