use serde::{Deserialize, Serialize};

use crate::shared::utils::slug::slugify;
use crate::shared::utils::timestamp::now_rfc3339;

/// Role id reserved for the seeded super-admin role.
pub const SUPER_ADMIN_ROLE_ID: i64 = 1;
pub const SUPER_ADMIN_SLUG: &str = "super-admin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub permissions: Vec<String>, // Catalog ids like "videos.edit"
    pub is_system: bool,          // Platform-defined, not editable through the API
    pub is_active: bool,
    pub user_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A role that has not been persisted yet; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub is_system: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl NewRole {
    pub fn new(name: String, description: Option<String>, permissions: Vec<String>) -> Self {
        let now = now_rfc3339();

        Self {
            slug: slugify(&name),
            name,
            description,
            permissions,
            is_system: false,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn system(name: &str, slug: &str, description: &str, permissions: Vec<String>) -> Self {
        let mut role = Self::new(name.to_string(), Some(description.to_string()), permissions);
        role.slug = slug.to_string();
        role.is_system = true;
        role
    }
}

/// Partial update; `None` leaves the column untouched and an empty description clears it.
#[derive(Debug, Clone, Default)]
pub struct RoleChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl RoleChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.permissions.is_none()
            && self.is_active.is_none()
    }
}
