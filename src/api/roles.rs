use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::api::middleware::{ApiResponse, ApiResult, AppState, AuthenticatedUser};
use crate::models::*;

pub async fn list_roles(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<RoleResponse>>> {
    Ok(ApiResponse::ok(state.role_service.list_roles().await?))
}

pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<RoleResponse>> {
    Ok(ApiResponse::ok(state.role_service.get_role(id).await?))
}

pub async fn create_role(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, ApiResponse<RoleResponse>)> {
    let role = state.role_service.create_role(&auth_user, request).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Role created", role),
    ))
}

pub async fn update_role(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRoleRequest>,
) -> ApiResult<ApiResponse<RoleResponse>> {
    let role = state.role_service.update_role(&auth_user, id, request).await?;
    Ok(ApiResponse::with_message("Role updated", role))
}

pub async fn delete_role(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.role_service.delete(&auth_user, id).await?;
    Ok(ApiResponse::with_message("Role deleted", ()))
}

pub async fn toggle_permissions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<TogglePermissionsRequest>,
) -> ApiResult<ApiResponse<RoleResponse>> {
    let role = state
        .role_service
        .toggle_permissions(&auth_user, id, request)
        .await?;
    Ok(ApiResponse::with_message("Permissions updated", role))
}
