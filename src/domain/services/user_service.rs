use std::sync::Arc;

use crate::domain::entities::{User, UserChanges, UserQuery, UserStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::shared::utils::email_validator::validate_and_normalize_email;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Clone)]
pub struct UserDomainService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserDomainService {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.users
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.users.get_user_by_email(&email.trim().to_lowercase()).await
    }

    pub async fn create_user(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role_id: i64,
    ) -> DomainResult<User> {
        let name = validate_name(&name)?;
        let email = validate_and_normalize_email(&email)?;
        self.ensure_assignable_role(role_id).await?;

        if self.users.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".to_string()));
        }

        let user = User::new(name, email, password_hash, role_id);
        self.users.create_user(&user).await?;
        tracing::info!("User {} created with role {}", user.id, role_id);

        self.get_user(&user.id).await
    }

    pub async fn update_user(&self, id: &str, changes: UserChanges) -> DomainResult<User> {
        let user = self.get_user(id).await?;

        let mut validated = UserChanges::default();

        if let Some(name) = changes.name {
            validated.name = Some(validate_name(&name)?);
        }

        if let Some(email) = changes.email {
            let email = validate_and_normalize_email(&email)?;
            if email != user.email {
                if self.users.get_user_by_email(&email).await?.is_some() {
                    return Err(DomainError::Conflict("Email already exists".to_string()));
                }
                validated.email = Some(email);
            }
        }

        if let Some(role_id) = changes.role_id {
            if role_id != user.role_id {
                self.ensure_assignable_role(role_id).await?;
                validated.role_id = Some(role_id);
            }
        }

        if validated.name.is_none() && validated.email.is_none() && validated.role_id.is_none() {
            return Ok(user);
        }

        self.users.update_user(id, &validated).await?;
        self.get_user(id).await
    }

    pub async fn ban_user(&self, id: &str, reason: Option<String>) -> DomainResult<User> {
        let user = self.get_user(id).await?;
        if user.is_deleted() {
            return Err(DomainError::ValidationError(
                "Cannot ban a deleted user".to_string(),
            ));
        }
        if user.is_banned() {
            return Err(DomainError::Conflict("User is already banned".to_string()));
        }

        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let revoked = self.users.ban_user(id, reason.as_deref()).await?;
        tracing::info!("User {} banned, {} sessions revoked", id, revoked);

        self.get_user(id).await
    }

    pub async fn unban_user(&self, id: &str) -> DomainResult<User> {
        let user = self.get_user(id).await?;
        if !user.is_banned() {
            return Err(DomainError::Conflict("User is not banned".to_string()));
        }

        self.users.set_status(id, UserStatus::Active, None).await?;
        tracing::info!("User {} unbanned", id);

        self.get_user(id).await
    }

    pub async fn soft_delete_user(&self, id: &str) -> DomainResult<()> {
        let user = self.get_user(id).await?;
        if user.is_deleted() {
            return Err(DomainError::Conflict("User is already deleted".to_string()));
        }

        self.users.soft_delete_user(id).await?;
        tracing::info!("User {} soft-deleted", id);

        Ok(())
    }

    pub async fn restore_user(&self, id: &str) -> DomainResult<User> {
        let user = self.get_user(id).await?;
        if !user.is_deleted() {
            return Err(DomainError::Conflict("User is not deleted".to_string()));
        }

        self.users.restore_user(id).await?;
        tracing::info!("User {} restored", id);

        self.get_user(id).await
    }

    pub async fn record_login(&self, id: &str) -> DomainResult<()> {
        self.users.record_login(id).await
    }

    /// Server-side search over name and email. `page` is 1-based.
    pub async fn list_users(
        &self,
        search: Option<String>,
        page: Option<i64>,
        per_page: Option<i64>,
        include_deleted: bool,
    ) -> DomainResult<UserPage> {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let search = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let query = UserQuery {
            search,
            include_deleted,
            limit: per_page,
            offset: (page - 1) * per_page,
        };
        let (users, total) = self.users.list_users(&query).await?;

        Ok(UserPage {
            users,
            total,
            page,
            per_page,
        })
    }

    async fn ensure_assignable_role(&self, role_id: i64) -> DomainResult<()> {
        let role = self
            .roles
            .get_role_by_id(role_id)
            .await?
            .ok_or_else(|| {
                DomainError::ValidationError(format!("Role {} does not exist", role_id))
            })?;

        if !role.is_active {
            return Err(DomainError::ValidationError(format!(
                "Role '{}' is inactive",
                role.name
            )));
        }

        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::ValidationError(
            "Name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > 100 {
        return Err(DomainError::ValidationError(
            "Name must be at most 100 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}
