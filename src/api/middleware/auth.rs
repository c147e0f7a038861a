use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::domain::access::{self, MatchMode, Principal, Requirement};
use crate::domain::entities::{Session, User};
use crate::services::{AuthService, RoleService, SessionService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub session_duration_hours: i64,
    pub auth_service: AuthService,
    pub role_service: RoleService,
    pub user_service: UserService,
    pub session_service: SessionService,
}

/// Extract and validate the bearer token from the Authorization header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    let auth_user = state.auth_service.resolve_token(&token).await?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub principal: Principal,
    pub session: Session,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn is_super_admin(&self) -> bool {
        access::is_super_admin(&self.principal)
    }

    pub fn has_permission(&self, requirement: Requirement<'_>) -> bool {
        access::has_permission(&self.principal, requirement)
    }

    /// Inline guard for a single action.
    pub fn require(&self, permission: &str) -> ApiResult<()> {
        self.require_with(&[permission], MatchMode::Any)
    }

    pub fn require_with(&self, permissions: &[&str], mode: MatchMode) -> ApiResult<()> {
        let requirement = Requirement { permissions, mode };
        if self.has_permission(requirement) {
            return Ok(());
        }

        tracing::warn!(
            "Permission denied: {} lacks {:?} ({:?})",
            self.user.email,
            permissions,
            mode
        );
        Err(ApiError::Forbidden(match permissions {
            [single] => format!("Requires '{}' permission", single),
            _ => format!("Requires {:?} permissions", permissions),
        }))
    }
}
