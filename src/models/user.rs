use serde::{Deserialize, Serialize};

use crate::domain::entities::{User, UserStatus};
use crate::domain::services::UserPage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub role_slug: Option<String>,
    pub is_super_admin: bool,
    pub status: UserStatus,
    pub banned_reason: Option<String>,
    pub deleted_at: Option<String>,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BanUserRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    #[serde(default)]
    pub include_deleted: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            is_super_admin: user.is_super_admin(),
            id: user.id,
            name: user.name,
            email: user.email,
            role_id: user.role_id,
            role_slug: user.role_slug,
            status: user.status,
            banned_reason: user.banned_reason,
            deleted_at: user.deleted_at,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserPage> for UserListResponse {
    fn from(page: UserPage) -> Self {
        Self {
            users: page.users.into_iter().map(UserResponse::from).collect(),
            total: page.total,
            page: page.page,
            per_page: page.per_page,
        }
    }
}
