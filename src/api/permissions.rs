use axum::{
    extract::{Query, State},
    Extension,
};

use crate::api::middleware::{ApiResponse, ApiResult, AppState, AuthenticatedUser};
use crate::domain::{access, route_map};
use crate::models::{PermissionGroupResponse, PermissionSearchQuery, RouteBindingResponse};

pub async fn list_permissions(
    State(state): State<AppState>,
    Query(query): Query<PermissionSearchQuery>,
) -> ApiResult<ApiResponse<Vec<PermissionGroupResponse>>> {
    Ok(ApiResponse::ok(
        state.role_service.list_permissions(query.q.as_deref()),
    ))
}

/// The route map, restricted to what the caller can open.
pub async fn list_routes(
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> ApiResult<ApiResponse<Vec<RouteBindingResponse>>> {
    let routes = route_map::routes()
        .filter(|binding| access::can_access_route(&auth_user.principal, binding.path))
        .map(RouteBindingResponse::from)
        .collect();

    Ok(ApiResponse::ok(routes))
}
