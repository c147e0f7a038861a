use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::middleware::auth::AuthenticatedUser;
use crate::domain::guard::{evaluate_route, RouteDecision};
use crate::domain::route_map;

/// Consistent body for a denied route: lists what would have unlocked it.
pub fn format_permission_error(route: &str, required_permissions: &[&str]) -> serde_json::Value {
    json!({
        "status": false,
        "message": "Forbidden: Missing required permissions",
        "route": route,
        "required_permissions": required_permissions
    })
}

/// Maps an API path onto the console route it serves: `/api/users/42` guards like `/users/42`.
pub fn console_route(path: &str) -> &str {
    match path.strip_prefix("/api") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Route guard. Runs after `require_auth` and checks the route-permission map for
/// the requested path. No session means 401, a denied route means 403.
pub async fn require_route_access(request: Request, next: Next) -> Response {
    let route = console_route(request.uri().path()).to_string();
    let auth_user = request.extensions().get::<AuthenticatedUser>();

    match evaluate_route(auth_user.map(|u| &u.principal), &route, None) {
        RouteDecision::RenderChildren => next.run(request).await,
        RouteDecision::RedirectToLogin => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "status": false,
                "message": "Unauthorized: Authentication required"
            })),
        )
            .into_response(),
        RouteDecision::RedirectToUnauthorized => {
            let required = route_map::required_permissions(&route);
            if let Some(user) = auth_user {
                tracing::warn!(
                    "Route denied: {} lacks any of {:?} for {}",
                    user.user.email,
                    required,
                    route
                );
            }
            (
                StatusCode::FORBIDDEN,
                Json(format_permission_error(&route, required)),
            )
                .into_response()
        }
    }
}
