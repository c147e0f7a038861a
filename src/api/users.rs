use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use crate::api::middleware::{ApiResponse, ApiResult, AppState, AuthenticatedUser};
use crate::models::*;

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<ApiResponse<UserListResponse>> {
    Ok(ApiResponse::ok(state.user_service.list_users(query).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UserResponse>> {
    Ok(ApiResponse::ok(state.user_service.get_user(&id).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, ApiResponse<UserResponse>)> {
    let user = state.user_service.create_user(&auth_user, request).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("User created", user),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let user = state.user_service.update_user(&auth_user, &id, request).await?;
    Ok(ApiResponse::with_message("User updated", user))
}

pub async fn ban_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    request: Option<Json<BanUserRequest>>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let user = state.user_service.ban_user(&auth_user, &id, request).await?;
    Ok(ApiResponse::with_message("User banned", user))
}

pub async fn unban_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let user = state.user_service.unban_user(&auth_user, &id).await?;
    Ok(ApiResponse::with_message("User unbanned", user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.user_service.delete_user(&auth_user, &id).await?;
    Ok(ApiResponse::with_message("User deleted", ()))
}

pub async fn restore_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let user = state.user_service.restore_user(&auth_user, &id).await?;
    Ok(ApiResponse::with_message("User restored", user))
}
