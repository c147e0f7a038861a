use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grouping used by the role editor to bulk-toggle permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermissionCategory {
    Dashboard,
    Users,
    Content,
    Moderation,
    Financial,
    Platform,
    System,
}

impl PermissionCategory {
    pub const ALL: [PermissionCategory; 7] = [
        PermissionCategory::Dashboard,
        PermissionCategory::Users,
        PermissionCategory::Content,
        PermissionCategory::Moderation,
        PermissionCategory::Financial,
        PermissionCategory::Platform,
        PermissionCategory::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionCategory::Dashboard => "Dashboard",
            PermissionCategory::Users => "Users",
            PermissionCategory::Content => "Content",
            PermissionCategory::Moderation => "Moderation",
            PermissionCategory::Financial => "Financial",
            PermissionCategory::Platform => "Platform",
            PermissionCategory::System => "System",
        }
    }
}

impl fmt::Display for PermissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid permission category: {}", s))
    }
}

/// Immutable catalog entry. Permissions are compiled in, never created at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permission {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PermissionCategory,
    pub description: Option<&'static str>,
    pub route: Option<&'static str>,
}

impl Permission {
    /// Case-insensitive free-text match over name, id and category.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self.id.to_lowercase().contains(&query)
            || self.category.as_str().to_lowercase().contains(&query)
    }
}
