use axum::{extract::State, Extension, Json};

use crate::api::middleware::{ApiResponse, ApiResult, AppState, AuthenticatedUser};
use crate::domain::access;
use crate::models::{LoginRequest, LoginResponse, SessionResponse};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    let (session, user) = state
        .auth_service
        .authenticate(&request.email, &request.password)
        .await?;

    Ok(ApiResponse::with_message(
        "Signed in",
        LoginResponse {
            token: session.token,
            expires_at: session.expires_at,
            user: user.into(),
        },
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> ApiResult<ApiResponse<()>> {
    state.auth_service.logout(&auth_user.token).await?;
    tracing::info!("User {} signed out", auth_user.user.email);
    Ok(ApiResponse::with_message("Signed out", ()))
}

pub async fn get_session(
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> ApiResult<ApiResponse<SessionResponse>> {
    let accessible_routes = access::accessible_routes(&auth_user.principal)
        .into_iter()
        .map(str::to_string)
        .collect();
    let is_super_admin = auth_user.is_super_admin();

    Ok(ApiResponse::ok(SessionResponse {
        user: auth_user.user.into(),
        principal: auth_user.principal,
        is_super_admin,
        accessible_routes,
        expires_at: auth_user.session.expires_at,
    }))
}
