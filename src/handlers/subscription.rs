use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::subscription::{CreateSubscriptionRequest, SubscriptionResponse},
    rest::AppState,
};

fn subscription_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::Validation("invalid subscription id".to_string()))
}

pub async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<SubscriptionResponse>>, AppError> {
    Ok(Json(state.subscriptions.list(user.id).await?))
}

pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let id = subscription_id(id)?;
    Ok(Json(state.subscriptions.get(id, user.id).await?))
}

pub async fn create_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let Json(req) =
        payload.map_err(|_| AppError::Validation("invalid request body".to_string()))?;

    let created = state.subscriptions.create(req, user.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let id = subscription_id(id)?;
    state.subscriptions.delete(id, user.id).await?;
    Ok(Json(json!({ "message": "delete success" })))
}
