use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::access::{self, Principal};
use crate::shared::utils::timestamp::now_rfc3339;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Banned,
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Banned => write!(f, "banned"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "banned" => Ok(UserStatus::Banned),
            _ => Err(format!("Invalid user status: {}", s)),
        }
    }
}

/// Admin-facing view of a platform user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: i64,
    pub role_slug: Option<String>,
    pub status: UserStatus,
    pub banned_reason: Option<String>,
    pub deleted_at: Option<String>,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role_id: i64) -> Self {
        let now = now_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            role_id,
            role_slug: None,
            status: UserStatus::Active,
            banned_reason: None,
            deleted_at: None,
            last_login_at: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Identity-only principal; carries no permissions, just enough for the bypass check.
    pub fn is_super_admin(&self) -> bool {
        let mut principal = Principal::default().with_role_id(self.role_id);
        if let Some(slug) = &self.role_slug {
            principal = principal.with_role(self.role_id, slug.clone());
        }
        access::is_super_admin(&principal)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_banned(&self) -> bool {
        self.status == UserStatus::Banned
    }

    /// Banned or soft-deleted users cannot open sessions.
    pub fn can_sign_in(&self) -> bool {
        !self.is_banned() && !self.is_deleted()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i64>,
}

/// Server-side search over the user table.
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub search: Option<String>,
    pub include_deleted: bool,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_by_role_id() {
        let user = User::new("Root".into(), "root@example.com".into(), "hash".into(), 1);
        assert!(user.is_super_admin());
    }

    #[test]
    fn test_super_admin_by_slug() {
        let mut user = User::new("Root".into(), "root@example.com".into(), "hash".into(), 9);
        assert!(!user.is_super_admin());
        user.role_slug = Some("super-admin".into());
        assert!(user.is_super_admin());
    }

    #[test]
    fn test_banned_or_deleted_cannot_sign_in() {
        let mut user = User::new("Ann".into(), "ann@example.com".into(), "hash".into(), 3);
        assert!(user.can_sign_in());

        user.status = UserStatus::Banned;
        assert!(!user.can_sign_in());

        user.status = UserStatus::Active;
        user.deleted_at = Some("2026-01-01T00:00:00Z".into());
        assert!(!user.can_sign_in());
    }
}
