use serde::{Deserialize, Serialize};

use crate::domain::access::Principal;
use crate::models::user::UserResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// What a console needs after sign-in to decide what to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub principal: Principal,
    pub is_super_admin: bool,
    pub accessible_routes: Vec<String>,
    pub expires_at: String,
}
