use std::sync::Arc;

use crate::domain::catalog;
use crate::domain::entities::{NewRole, PermissionCategory, Role, RoleChanges, SUPER_ADMIN_SLUG};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::selection::PermissionSelection;
use crate::shared::utils::slug::slugify;

/// Which permissions a bulk toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleScope {
    All,
    Category(PermissionCategory),
}

#[derive(Clone)]
pub struct RoleDomainService {
    repository: Arc<dyn RoleRepository>,
}

impl RoleDomainService {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        self.repository.list_roles().await
    }

    pub async fn get_role(&self, id: i64) -> DomainResult<Role> {
        self.repository
            .get_role_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Role with id {} not found", id)))
    }

    pub async fn create_role(
        &self,
        name: String,
        description: Option<String>,
        permissions: Vec<String>,
    ) -> DomainResult<Role> {
        let name = name.trim().to_string();
        let slug = validate_name(&name)?;
        let permissions = validate_permissions(permissions)?;

        self.ensure_unique(&name, &slug, None).await?;

        let role = NewRole::new(name, normalize_description(description), permissions);
        let id = self.repository.create_role(&role).await?;

        tracing::info!("Role '{}' created with id {}", role.name, id);
        self.get_role(id).await
    }

    pub async fn update_role(&self, id: i64, mut changes: RoleChanges) -> DomainResult<Role> {
        let role = self.get_role(id).await?;

        // Domain Rule: system roles are read-only
        if role.is_system {
            return Err(DomainError::Forbidden("Cannot modify system role".to_string()));
        }

        if let Some(name) = changes.name.take() {
            let name = name.trim().to_string();
            let slug = validate_name(&name)?;
            if name != role.name {
                self.ensure_unique(&name, &slug, Some(id)).await?;
                changes.name = Some(name);
                changes.slug = Some(slug);
            }
        }

        if let Some(permissions) = changes.permissions.take() {
            changes.permissions = Some(validate_permissions(permissions)?);
        }

        changes.description = changes.description.take().map(|d| d.trim().to_string());

        if changes.is_empty() {
            return Ok(role);
        }

        self.repository.update_role(id, &changes).await?;
        tracing::info!("Role {} updated", id);

        self.get_role(id).await
    }

    pub async fn delete_role(&self, id: i64) -> DomainResult<()> {
        let role = self.get_role(id).await?;

        // Domain Rule: system roles cannot be deleted
        if role.is_system {
            return Err(DomainError::Forbidden("Cannot delete system role".to_string()));
        }

        // Domain Rule: cannot delete while assigned
        let count = self.repository.count_users_with_role(id).await?;
        if count > 0 {
            return Err(DomainError::Conflict(format!(
                "Cannot delete role: {} users currently assigned",
                count
            )));
        }

        self.repository.delete_role(id).await?;
        tracing::info!("Role '{}' ({}) deleted", role.name, id);

        Ok(())
    }

    /// Applies a bulk toggle to the stored permission set and persists the result.
    pub async fn toggle_permissions(&self, id: i64, scope: ToggleScope) -> DomainResult<Role> {
        let role = self.get_role(id).await?;

        if role.is_system {
            return Err(DomainError::Forbidden("Cannot modify system role".to_string()));
        }

        let mut selection = PermissionSelection::from_ids(&role.permissions);
        match scope {
            ToggleScope::All => selection.toggle_all(),
            ToggleScope::Category(category) => selection.toggle_category(category),
        }

        let changes = RoleChanges {
            permissions: Some(selection.into_vec()),
            ..RoleChanges::default()
        };
        self.repository.update_role(id, &changes).await?;

        self.get_role(id).await
    }

    pub async fn count_users_with_role(&self, role_id: i64) -> DomainResult<i64> {
        self.repository.count_users_with_role(role_id).await
    }

    async fn ensure_unique(
        &self,
        name: &str,
        slug: &str,
        current: Option<i64>,
    ) -> DomainResult<()> {
        let clashes = |role: &Option<Role>| role.as_ref().is_some_and(|r| Some(r.id) != current);

        if clashes(&self.repository.get_role_by_name(name).await?) {
            return Err(DomainError::Conflict("Role name already exists".to_string()));
        }
        if clashes(&self.repository.get_role_by_slug(slug).await?) {
            return Err(DomainError::Conflict(format!(
                "Role slug '{}' already exists",
                slug
            )));
        }

        Ok(())
    }
}

/// Validates a trimmed role name and returns the slug derived from it.
fn validate_name(name: &str) -> DomainResult<String> {
    if name.is_empty() {
        return Err(DomainError::ValidationError(
            "Role name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > 64 {
        return Err(DomainError::ValidationError(
            "Role name must be at most 64 characters".to_string(),
        ));
    }

    let slug = slugify(name);
    if slug.is_empty() {
        return Err(DomainError::ValidationError(
            "Role name must contain at least one letter or digit".to_string(),
        ));
    }
    if slug == SUPER_ADMIN_SLUG {
        return Err(DomainError::Conflict(format!(
            "Role slug '{}' is reserved",
            SUPER_ADMIN_SLUG
        )));
    }

    Ok(slug)
}

/// Rejects ids outside the catalog; returns the set deduplicated in catalog order.
fn validate_permissions(permissions: Vec<String>) -> DomainResult<Vec<String>> {
    let unknown = catalog::unknown_ids(&permissions);
    if !unknown.is_empty() {
        return Err(DomainError::ValidationError(format!(
            "Unknown permissions: {}",
            unknown.join(", ")
        )));
    }

    Ok(PermissionSelection::from_ids(&permissions).into_vec())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
