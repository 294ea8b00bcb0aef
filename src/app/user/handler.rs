//! 用户处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use super::model::{User, UserBody, UserFields};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    response::{Ack, ApiResponse},
};

/// 路径中的 id 无法解析时按不存在处理
fn parse_id(raw: &str) -> Result<i64, CoreError> {
    raw.trim().parse().map_err(|_| CoreError::user_not_found())
}

fn parse_body(
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<UserFields, CoreError> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| CoreError::bad_request(rejection.body_text()))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    let users = state
        .users
        .list_all()
        .await
        .map_err(CoreError::storage("Failed to fetch users"))?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserBody>>), CoreError> {
    let fields = parse_body(payload)?;
    let user = state
        .users
        .insert(&fields)
        .await
        .map_err(CoreError::storage("Failed to create user"))?;

    info!("Created user: {} ({})", user.user_name, user.user_id);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(UserBody { user }))))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, CoreError> {
    let id = parse_id(&id)?;
    let user = state
        .users
        .get_by_id(id)
        .await
        .map_err(CoreError::storage("Failed to fetch user"))?
        .ok_or_else(CoreError::user_not_found)?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<Json<ApiResponse<UserBody>>, CoreError> {
    let id = parse_id(&id)?;
    let fields = parse_body(payload)?;
    let user = state
        .users
        .update(id, &fields)
        .await
        .map_err(CoreError::storage("Failed to update user"))?
        .ok_or_else(CoreError::user_not_found)?;

    info!("Updated user: {} ({})", user.user_name, user.user_id);
    Ok(Json(ApiResponse::success(UserBody { user })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Ack>>, CoreError> {
    let id = parse_id(&id)?;
    let user = state
        .users
        .delete_by_id(id)
        .await
        .map_err(CoreError::storage("Failed to delete user"))?
        .ok_or_else(CoreError::user_not_found)?;

    info!("Deleted user: {}", user.user_id);
    Ok(Json(ApiResponse::ack()))
}
