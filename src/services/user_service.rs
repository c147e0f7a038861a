use std::sync::Arc;

use crate::api::middleware::{ApiError, ApiResult, AuthenticatedUser};
use crate::domain::entities::{User, UserChanges, SUPER_ADMIN_ROLE_ID};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::services::UserDomainService;
use crate::models::{
    BanUserRequest, CreateUserRequest, UpdateUserRequest, UserListQuery, UserListResponse,
    UserResponse,
};
use crate::services::auth::{hash_password, validate_password_complexity};

#[derive(Clone)]
pub struct UserService {
    domain_service: UserDomainService,
    roles: Arc<dyn RoleRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self {
            domain_service: UserDomainService::new(users, roles.clone()),
            roles,
        }
    }

    pub fn domain(&self) -> &UserDomainService {
        &self.domain_service
    }

    pub async fn list_users(&self, query: UserListQuery) -> ApiResult<UserListResponse> {
        let page = self
            .domain_service
            .list_users(query.q, query.page, query.per_page, query.include_deleted)
            .await?;
        Ok(page.into())
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<UserResponse> {
        Ok(self.domain_service.get_user(id).await?.into())
    }

    pub async fn create_user(
        &self,
        auth_user: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> ApiResult<UserResponse> {
        auth_user.require("users.create")?;
        self.ensure_can_assign_role(auth_user, request.role_id).await?;
        validate_password_complexity(&request.password)?;

        let password_hash = hash_password(&request.password)?;
        let user = self
            .domain_service
            .create_user(request.name, request.email, password_hash, request.role_id)
            .await?;

        tracing::info!("User {} created by {}", user.id, auth_user.user.email);
        Ok(user.into())
    }

    pub async fn update_user(
        &self,
        auth_user: &AuthenticatedUser,
        id: &str,
        request: UpdateUserRequest,
    ) -> ApiResult<UserResponse> {
        auth_user.require("users.edit")?;
        let target = self.domain_service.get_user(id).await?;
        ensure_can_manage(auth_user, &target)?;

        if let Some(role_id) = request.role_id.filter(|role_id| *role_id != target.role_id) {
            if target.id == auth_user.user.id {
                return Err(ApiError::Forbidden(
                    "Cannot change your own role".to_string(),
                ));
            }
            self.ensure_can_assign_role(auth_user, role_id).await?;
        }

        let changes = UserChanges {
            name: request.name,
            email: request.email,
            role_id: request.role_id,
        };
        let user = self.domain_service.update_user(id, changes).await?;

        Ok(user.into())
    }

    pub async fn ban_user(
        &self,
        auth_user: &AuthenticatedUser,
        id: &str,
        request: BanUserRequest,
    ) -> ApiResult<UserResponse> {
        auth_user.require("users.ban")?;
        let target = self.domain_service.get_user(id).await?;
        ensure_not_self(auth_user, &target, "ban")?;
        ensure_can_manage(auth_user, &target)?;

        let user = self.domain_service.ban_user(id, request.reason).await?;
        tracing::info!("User {} banned by {}", id, auth_user.user.email);

        Ok(user.into())
    }

    pub async fn unban_user(
        &self,
        auth_user: &AuthenticatedUser,
        id: &str,
    ) -> ApiResult<UserResponse> {
        auth_user.require("users.ban")?;
        let target = self.domain_service.get_user(id).await?;
        ensure_can_manage(auth_user, &target)?;

        Ok(self.domain_service.unban_user(id).await?.into())
    }

    pub async fn delete_user(&self, auth_user: &AuthenticatedUser, id: &str) -> ApiResult<()> {
        auth_user.require("users.delete")?;
        let target = self.domain_service.get_user(id).await?;
        ensure_not_self(auth_user, &target, "delete")?;
        ensure_can_manage(auth_user, &target)?;

        self.domain_service.soft_delete_user(id).await?;
        Ok(())
    }

    pub async fn restore_user(
        &self,
        auth_user: &AuthenticatedUser,
        id: &str,
    ) -> ApiResult<UserResponse> {
        auth_user.require("users.delete")?;
        let target = self.domain_service.get_user(id).await?;
        ensure_can_manage(auth_user, &target)?;

        Ok(self.domain_service.restore_user(id).await?.into())
    }

    /// A non-super-admin may only hand out roles whose permissions they already hold.
    async fn ensure_can_assign_role(
        &self,
        auth_user: &AuthenticatedUser,
        role_id: i64,
    ) -> ApiResult<()> {
        if auth_user.is_super_admin() {
            return Ok(());
        }

        if role_id == SUPER_ADMIN_ROLE_ID {
            return Err(ApiError::Forbidden(
                "Only a super-admin can assign the super-admin role".to_string(),
            ));
        }

        // Unknown roles are rejected by the domain service with a validation error
        let Some(role) = self.roles.get_role_by_id(role_id).await? else {
            return Ok(());
        };

        let missing: Vec<&str> = role
            .permissions
            .iter()
            .map(String::as_str)
            .filter(|p| !auth_user.principal.holds(p))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Cannot assign role '{}' with permissions you do not hold: {}",
                role.name,
                missing.join(", ")
            )))
        }
    }
}

/// Super-admin accounts can only be managed by another super-admin.
fn ensure_can_manage(auth_user: &AuthenticatedUser, target: &User) -> ApiResult<()> {
    if target.is_super_admin() && !auth_user.is_super_admin() {
        return Err(ApiError::Forbidden(
            "Only a super-admin can manage super-admin accounts".to_string(),
        ));
    }
    Ok(())
}

fn ensure_not_self(auth_user: &AuthenticatedUser, target: &User, action: &str) -> ApiResult<()> {
    if auth_user.user.id == target.id {
        return Err(ApiError::Forbidden(format!("Cannot {} your own account", action)));
    }
    Ok(())
}
