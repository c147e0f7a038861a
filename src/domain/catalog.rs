//! Static catalog of every permission the console knows about.

use std::collections::BTreeMap;

use crate::domain::entities::{Permission, PermissionCategory};

macro_rules! permission {
    ($id:literal, $name:literal, $category:ident, $description:literal, $route:expr) => {
        Permission {
            id: $id,
            name: $name,
            category: PermissionCategory::$category,
            description: Some($description),
            route: $route,
        }
    };
}

pub static PERMISSIONS: &[Permission] = &[
    // Dashboard
    permission!(
        "dashboard.view",
        "View Dashboard",
        Dashboard,
        "Open the overview dashboard",
        Some("/dashboard")
    ),
    permission!(
        "analytics.view",
        "View Analytics",
        Dashboard,
        "Read platform-wide statistics",
        Some("/analytics")
    ),
    // Users
    permission!(
        "users.view",
        "View Users",
        Users,
        "List and inspect user accounts",
        Some("/users")
    ),
    permission!(
        "users.create",
        "Create Users",
        Users,
        "Create user accounts",
        Some("/users/create")
    ),
    permission!(
        "users.edit",
        "Edit Users",
        Users,
        "Edit profiles and role assignments",
        None
    ),
    permission!(
        "users.delete",
        "Delete Users",
        Users,
        "Soft-delete and restore user accounts",
        None
    ),
    permission!(
        "users.ban",
        "Ban Users",
        Users,
        "Ban and unban user accounts",
        None
    ),
    permission!(
        "roles.view",
        "View Roles",
        Users,
        "List roles and their permissions",
        Some("/roles")
    ),
    permission!(
        "roles.create",
        "Create Roles",
        Users,
        "Create roles",
        Some("/roles/create")
    ),
    permission!(
        "roles.edit",
        "Edit Roles",
        Users,
        "Rename roles and change their permissions",
        None
    ),
    permission!(
        "roles.delete",
        "Delete Roles",
        Users,
        "Delete roles without assigned users",
        None
    ),
    // Content
    permission!(
        "videos.view",
        "View Videos",
        Content,
        "Browse uploaded videos",
        Some("/videos")
    ),
    permission!(
        "videos.edit",
        "Edit Videos",
        Content,
        "Edit video metadata",
        None
    ),
    permission!(
        "videos.delete",
        "Delete Videos",
        Content,
        "Remove videos",
        None
    ),
    permission!(
        "videos.feature",
        "Feature Videos",
        Content,
        "Promote videos to featured slots",
        None
    ),
    permission!(
        "channels.view",
        "View Channels",
        Content,
        "Browse channels",
        Some("/channels")
    ),
    permission!(
        "channels.edit",
        "Edit Channels",
        Content,
        "Edit channel details",
        None
    ),
    permission!(
        "channels.delete",
        "Delete Channels",
        Content,
        "Remove channels",
        None
    ),
    permission!(
        "channels.verify",
        "Verify Channels",
        Content,
        "Grant or revoke channel verification",
        None
    ),
    permission!(
        "playlists.view",
        "View Playlists",
        Content,
        "Browse playlists",
        Some("/playlists")
    ),
    permission!(
        "playlists.edit",
        "Edit Playlists",
        Content,
        "Edit playlists",
        None
    ),
    permission!(
        "playlists.delete",
        "Delete Playlists",
        Content,
        "Remove playlists",
        None
    ),
    permission!(
        "categories.view",
        "View Categories",
        Content,
        "Browse content categories",
        Some("/categories")
    ),
    permission!(
        "categories.create",
        "Create Categories",
        Content,
        "Create content categories",
        None
    ),
    permission!(
        "categories.edit",
        "Edit Categories",
        Content,
        "Edit content categories",
        None
    ),
    permission!(
        "categories.delete",
        "Delete Categories",
        Content,
        "Remove content categories",
        None
    ),
    // Moderation
    permission!(
        "comments.view",
        "View Comments",
        Moderation,
        "Browse comments",
        Some("/comments")
    ),
    permission!(
        "comments.moderate",
        "Moderate Comments",
        Moderation,
        "Hide, approve and pin comments",
        None
    ),
    permission!(
        "comments.delete",
        "Delete Comments",
        Moderation,
        "Remove comments",
        None
    ),
    permission!(
        "reports.view",
        "View Reports",
        Moderation,
        "Browse content reports",
        Some("/reports")
    ),
    permission!(
        "reports.resolve",
        "Resolve Reports",
        Moderation,
        "Close content reports",
        None
    ),
    // Financial
    permission!(
        "monetization.view",
        "View Monetization Requests",
        Financial,
        "Browse monetization requests",
        Some("/monetization")
    ),
    permission!(
        "monetization.approve",
        "Approve Monetization",
        Financial,
        "Approve monetization requests",
        None
    ),
    permission!(
        "monetization.reject",
        "Reject Monetization",
        Financial,
        "Reject monetization requests",
        None
    ),
    // Platform
    permission!(
        "support.view",
        "View Support Tickets",
        Platform,
        "Browse support tickets",
        Some("/support")
    ),
    permission!(
        "support.reply",
        "Reply to Tickets",
        Platform,
        "Answer support tickets",
        None
    ),
    permission!(
        "support.close",
        "Close Tickets",
        Platform,
        "Close support tickets",
        None
    ),
    // System
    permission!(
        "permissions.view",
        "View Permissions",
        System,
        "Browse the permission catalog",
        Some("/permissions")
    ),
    permission!(
        "settings.view",
        "View Settings",
        System,
        "Read platform settings",
        Some("/settings")
    ),
    permission!(
        "settings.edit",
        "Edit Settings",
        System,
        "Change platform settings",
        None
    ),
];

pub fn all() -> &'static [Permission] {
    PERMISSIONS
}

pub fn find(id: &str) -> Option<&'static Permission> {
    PERMISSIONS.iter().find(|p| p.id == id)
}

pub fn contains(id: &str) -> bool {
    find(id).is_some()
}

pub fn by_category(category: PermissionCategory) -> impl Iterator<Item = &'static Permission> {
    PERMISSIONS.iter().filter(move |p| p.category == category)
}

pub fn ids_in_category(category: PermissionCategory) -> Vec<&'static str> {
    by_category(category).map(|p| p.id).collect()
}

pub fn search(query: &str) -> Vec<&'static Permission> {
    PERMISSIONS.iter().filter(|p| p.matches(query)).collect()
}

/// Search results grouped by category, categories in declaration order.
pub fn grouped(query: &str) -> BTreeMap<PermissionCategory, Vec<&'static Permission>> {
    let mut groups: BTreeMap<PermissionCategory, Vec<&'static Permission>> = BTreeMap::new();
    for permission in search(query) {
        groups.entry(permission.category).or_default().push(permission);
    }
    groups
}

/// Returns the ids that are not in the catalog.
pub fn unknown_ids<'a, I>(ids: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    ids.into_iter()
        .map(String::as_str)
        .filter(|id| !contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_dot_namespaced() {
        let mut seen = HashSet::new();
        for permission in PERMISSIONS {
            assert!(seen.insert(permission.id), "duplicate id {}", permission.id);
            let (resource, action) = permission
                .id
                .split_once('.')
                .expect("permission id must be dot-namespaced");
            assert!(!resource.is_empty() && !action.is_empty());
        }
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in PermissionCategory::ALL {
            assert!(
                by_category(category).next().is_some(),
                "category {} has no permissions",
                category
            );
        }
    }

    #[test]
    fn test_search_by_category_name() {
        let results = search("financial");
        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|p| p.category == PermissionCategory::Financial));
    }

    #[test]
    fn test_grouped_keeps_category_order() {
        let groups = grouped("");
        let categories: Vec<_> = groups.keys().copied().collect();
        assert_eq!(categories, PermissionCategory::ALL.to_vec());
    }

    #[test]
    fn test_unknown_ids() {
        let ids = vec!["videos.view".to_string(), "videos.teleport".to_string()];
        assert_eq!(unknown_ids(&ids), vec!["videos.teleport"]);
    }
}
