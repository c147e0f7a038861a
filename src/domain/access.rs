//! Access evaluator.
//!
//! Every authorization decision in the crate, whether it comes from the route
//! guard, the inline guard or a handler, goes through [`has_permission`], so the
//! super-admin bypass behaves identically everywhere. Evaluation is pure: no I/O,
//! no panics, and missing role data simply means "no elevated access".

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::entities::{Role, SUPER_ADMIN_ROLE_ID, SUPER_ADMIN_SLUG};
use crate::domain::route_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Any,
    All,
}

/// What a piece of content or a route demands from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement<'a> {
    pub permissions: &'a [&'a str],
    pub mode: MatchMode,
}

impl<'a> Requirement<'a> {
    pub const NONE: Requirement<'static> = Requirement {
        permissions: &[],
        mode: MatchMode::Any,
    };

    pub fn any(permissions: &'a [&'a str]) -> Self {
        Self {
            permissions,
            mode: MatchMode::Any,
        }
    }

    pub fn all(permissions: &'a [&'a str]) -> Self {
        Self {
            permissions,
            mode: MatchMode::All,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedRole {
    pub id: Option<i64>,
    pub slug: Option<String>,
}

/// The authenticated caller as the evaluator sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub permissions: BTreeSet<String>,
    pub assigned_role: Option<AssignedRole>,
    /// Denormalized copy of the assigned role id carried by some session payloads.
    pub role_id: Option<i64>,
}

impl Principal {
    pub fn new<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            assigned_role: None,
            role_id: None,
        }
    }

    pub fn with_role(mut self, id: i64, slug: impl Into<String>) -> Self {
        self.assigned_role = Some(AssignedRole {
            id: Some(id),
            slug: Some(slug.into()),
        });
        self
    }

    pub fn with_role_id(mut self, role_id: i64) -> Self {
        self.role_id = Some(role_id);
        self
    }

    /// Builds the principal for a user holding `role`. Inactive roles grant nothing,
    /// but the role identity is kept so the super-admin bypass still applies.
    pub fn from_role(role: &Role) -> Self {
        let permissions: Vec<String> = if role.is_active {
            role.permissions.clone()
        } else {
            Vec::new()
        };

        Self::new(permissions)
            .with_role(role.id, role.slug.clone())
            .with_role_id(role.id)
    }

    pub fn holds(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

pub fn is_super_admin(principal: &Principal) -> bool {
    let by_assigned_role = principal.assigned_role.as_ref().is_some_and(|role| {
        role.slug.as_deref() == Some(SUPER_ADMIN_SLUG) || role.id == Some(SUPER_ADMIN_ROLE_ID)
    });

    by_assigned_role || principal.role_id == Some(SUPER_ADMIN_ROLE_ID)
}

pub fn has_permission(principal: &Principal, requirement: Requirement<'_>) -> bool {
    if is_super_admin(principal) {
        return true;
    }

    if requirement.is_empty() {
        return true;
    }

    match requirement.mode {
        MatchMode::All => requirement.permissions.iter().all(|p| principal.holds(p)),
        MatchMode::Any => requirement.permissions.iter().any(|p| principal.holds(p)),
    }
}

pub fn has_any_permission(principal: &Principal, permissions: &[&str]) -> bool {
    has_permission(principal, Requirement::any(permissions))
}

pub fn has_all_permissions(principal: &Principal, permissions: &[&str]) -> bool {
    has_permission(principal, Requirement::all(permissions))
}

/// Unmapped routes are always reachable.
pub fn can_access_route(principal: &Principal, path: &str) -> bool {
    has_permission(principal, Requirement::any(route_map::required_permissions(path)))
}

/// Every mapped route the principal may open, in map order.
pub fn accessible_routes(principal: &Principal) -> Vec<&'static str> {
    route_map::routes()
        .filter(|binding| has_permission(principal, Requirement::any(binding.permissions)))
        .map(|binding| binding.path)
        .collect()
}
