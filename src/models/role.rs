use serde::{Deserialize, Serialize};

use crate::domain::catalog;
use crate::domain::entities::{Permission, PermissionCategory, Role};
use crate::domain::route_map::RouteBinding;
use crate::domain::selection::{PermissionSelection, SelectionState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub categories: Vec<CategorySelectionResponse>,
    pub is_system: bool,
    pub is_active: bool,
    pub user_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Tri-state of one category on a role, for the editor checkboxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySelectionResponse {
    pub category: PermissionCategory,
    pub state: SelectionState,
}

#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PermissionCategory,
    pub description: Option<&'static str>,
    pub route: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PermissionGroupResponse {
    pub category: PermissionCategory,
    pub permissions: Vec<PermissionResponse>,
}

#[derive(Debug, Serialize)]
pub struct RouteBindingResponse {
    pub path: &'static str,
    pub permissions: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>, // Catalog ids like "videos.edit"
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Body of a bulk toggle; without a category the whole catalog is toggled.
#[derive(Debug, Default, Deserialize)]
pub struct TogglePermissionsRequest {
    pub category: Option<PermissionCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PermissionSearchQuery {
    pub q: Option<String>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        let selection = PermissionSelection::from_ids(&role.permissions);
        let categories = PermissionCategory::ALL
            .into_iter()
            .map(|category| CategorySelectionResponse {
                category,
                state: selection.category_state(category),
            })
            .collect();

        Self {
            id: role.id,
            name: role.name,
            slug: role.slug,
            description: role.description,
            permissions: role.permissions,
            categories,
            is_system: role.is_system,
            is_active: role.is_active,
            user_count: role.user_count,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

impl From<&'static Permission> for PermissionResponse {
    fn from(permission: &'static Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name,
            category: permission.category,
            description: permission.description,
            route: permission.route,
        }
    }
}

impl From<&'static RouteBinding> for RouteBindingResponse {
    fn from(binding: &'static RouteBinding) -> Self {
        Self {
            path: binding.path,
            permissions: binding.permissions,
        }
    }
}

/// Catalog search results grouped by category.
pub fn permission_groups(query: &str) -> Vec<PermissionGroupResponse> {
    catalog::grouped(query)
        .into_iter()
        .map(|(category, permissions)| PermissionGroupResponse {
            category,
            permissions: permissions.into_iter().map(PermissionResponse::from).collect(),
        })
        .collect()
}
