//! Static binding of console routes to the permissions that unlock them.
//!
//! A route with no entry, or with an empty list, is unrestricted. Lists use
//! "any of" semantics: holding one of the permissions is enough.

pub struct RouteBinding {
    pub path: &'static str,
    pub permissions: &'static [&'static str],
}

macro_rules! route {
    ($path:literal $(, $permission:literal)*) => {
        RouteBinding {
            path: $path,
            permissions: &[$($permission),*],
        }
    };
}

pub static ROUTE_PERMISSIONS: &[RouteBinding] = &[
    route!("/dashboard"),
    route!("/profile"),
    route!("/analytics", "analytics.view"),
    route!("/users", "users.view"),
    route!("/users/create", "users.create"),
    route!("/users/:id", "users.view"),
    route!("/users/:id/edit", "users.edit"),
    route!("/roles", "roles.view"),
    route!("/roles/create", "roles.create"),
    route!("/roles/:id", "roles.view"),
    route!("/roles/:id/edit", "roles.edit"),
    route!("/permissions", "permissions.view", "roles.view"),
    route!("/videos", "videos.view"),
    route!("/videos/:id", "videos.view"),
    route!("/channels", "channels.view"),
    route!("/channels/:id", "channels.view"),
    route!("/playlists", "playlists.view"),
    route!("/categories", "categories.view"),
    route!("/comments", "comments.view", "comments.moderate"),
    route!("/reports", "reports.view"),
    route!("/monetization", "monetization.view"),
    route!("/support", "support.view"),
    route!("/support/:id", "support.view"),
    route!("/settings", "settings.view"),
];

/// Strips the query string and trailing slashes; the root stays `/`.
pub fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let is_param = expected.starts_with(':');
                if is_param && actual.is_empty() {
                    return false;
                }
                if !is_param && expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Finds the binding for `path`. Literal entries win over `:param` patterns, so
/// `/users/create` never resolves to `/users/:id`.
pub fn lookup(path: &str) -> Option<&'static RouteBinding> {
    let path = normalize(path);

    ROUTE_PERMISSIONS
        .iter()
        .find(|binding| binding.path == path)
        .or_else(|| {
            ROUTE_PERMISSIONS
                .iter()
                .filter(|binding| binding.path.contains(':'))
                .find(|binding| pattern_matches(binding.path, path))
        })
}

/// Permissions required for `path`; empty when the route is unrestricted.
pub fn required_permissions(path: &str) -> &'static [&'static str] {
    lookup(path).map(|binding| binding.permissions).unwrap_or(&[])
}

pub fn routes() -> impl Iterator<Item = &'static RouteBinding> {
    ROUTE_PERMISSIONS.iter()
}
