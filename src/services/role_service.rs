use std::sync::Arc;

use crate::api::middleware::{ApiError, ApiResult, AuthenticatedUser};
use crate::domain::catalog;
use crate::domain::entities::{Role, RoleChanges};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::services::{RoleDomainService, ToggleScope};
use crate::models::{
    permission_groups, CreateRoleRequest, PermissionGroupResponse, RoleResponse,
    TogglePermissionsRequest, UpdateRoleRequest,
};

#[derive(Clone)]
pub struct RoleService {
    domain_service: RoleDomainService,
}

impl RoleService {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self {
            domain_service: RoleDomainService::new(repository),
        }
    }

    pub async fn list_roles(&self) -> ApiResult<Vec<RoleResponse>> {
        let roles = self.domain_service.list_roles().await?;
        Ok(roles.into_iter().map(RoleResponse::from).collect())
    }

    pub async fn get_role(&self, id: i64) -> ApiResult<RoleResponse> {
        Ok(self.domain_service.get_role(id).await?.into())
    }

    /// Raw role, for callers that need the entity rather than the DTO.
    pub async fn find_role(&self, id: i64) -> ApiResult<Role> {
        Ok(self.domain_service.get_role(id).await?)
    }

    pub async fn create_role(
        &self,
        auth_user: &AuthenticatedUser,
        request: CreateRoleRequest,
    ) -> ApiResult<RoleResponse> {
        auth_user.require("roles.create")?;
        ensure_can_grant(auth_user, &request.permissions)?;

        let role = self
            .domain_service
            .create_role(request.name, request.description, request.permissions)
            .await?;

        Ok(role.into())
    }

    pub async fn update_role(
        &self,
        auth_user: &AuthenticatedUser,
        id: i64,
        request: UpdateRoleRequest,
    ) -> ApiResult<RoleResponse> {
        auth_user.require("roles.edit")?;
        if let Some(permissions) = &request.permissions {
            ensure_can_grant(auth_user, permissions)?;
        }

        let changes = RoleChanges {
            name: request.name,
            slug: None,
            description: request.description,
            permissions: request.permissions,
            is_active: request.is_active,
        };
        let role = self.domain_service.update_role(id, changes).await?;

        Ok(role.into())
    }

    pub async fn delete(&self, auth_user: &AuthenticatedUser, id: i64) -> ApiResult<()> {
        auth_user.require("roles.delete")?;
        self.domain_service.delete_role(id).await?;
        Ok(())
    }

    /// Bulk toggle over the whole catalog or one category, persisted on the role.
    pub async fn toggle_permissions(
        &self,
        auth_user: &AuthenticatedUser,
        id: i64,
        request: TogglePermissionsRequest,
    ) -> ApiResult<RoleResponse> {
        auth_user.require("roles.edit")?;

        // The caller must hold every permission in the toggled scope
        let scope = match request.category {
            Some(category) => ToggleScope::Category(category),
            None => ToggleScope::All,
        };
        let scope_ids: Vec<String> = match scope {
            ToggleScope::All => catalog::all()
                .iter()
                .map(|p| p.id.to_string())
                .collect(),
            ToggleScope::Category(category) => catalog::ids_in_category(category)
                .into_iter()
                .map(str::to_string)
                .collect(),
        };
        ensure_can_grant(auth_user, &scope_ids)?;

        let role = self.domain_service.toggle_permissions(id, scope).await?;
        Ok(role.into())
    }

    pub fn list_permissions(&self, query: Option<&str>) -> Vec<PermissionGroupResponse> {
        permission_groups(query.unwrap_or_default())
    }
}

/// A caller may only hand out permissions it holds itself; super-admins are exempt.
/// Ids outside the catalog are left for the domain validation to reject.
fn ensure_can_grant(auth_user: &AuthenticatedUser, permissions: &[String]) -> ApiResult<()> {
    if auth_user.is_super_admin() {
        return Ok(());
    }

    let missing: Vec<&str> = permissions
        .iter()
        .map(String::as_str)
        .filter(|p| catalog::contains(p) && !auth_user.principal.holds(p))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Cannot grant permissions you do not hold: {}",
            missing.join(", ")
        )))
    }
}
