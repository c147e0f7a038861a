use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::api::middleware::{require_auth, require_route_access, AppState};
use crate::api::{auth, permissions, roles, users};

const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Console routes: the route map decides who may reach them
    let guarded = Router::new()
        .route("/api/permissions", get(permissions::list_permissions))
        .route("/api/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/api/roles/:id",
            get(roles::get_role)
                .patch(roles::update_role)
                .delete(roles::delete_role),
        )
        .route(
            "/api/roles/:id/permissions/toggle",
            post(roles::toggle_permissions),
        )
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/users/:id/ban", post(users::ban_user))
        .route("/api/users/:id/unban", post(users::unban_user))
        .route("/api/users/:id/restore", post(users::restore_user))
        .route_layer(middleware::from_fn(require_route_access));

    let protected = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::get_session))
        .route("/api/routes", get(permissions::list_routes))
        .merge(guarded)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": true, "message": "ok" }))
}
