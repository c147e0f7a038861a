//! Navigation-level and content-level gates built on the access evaluator.

use serde::Serialize;

use crate::domain::access::{has_permission, Principal, Requirement};
use crate::domain::route_map;

/// Terminal outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    RedirectToLogin,
    RedirectToUnauthorized,
    RenderChildren,
}

impl RouteDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::RenderChildren)
    }
}

/// Decides what happens when `principal` (if signed in) navigates to `path`.
///
/// An explicit requirement overrides the route map; without one the map entry
/// for the path applies, and a path with no entry is unrestricted.
pub fn evaluate_route(
    principal: Option<&Principal>,
    path: &str,
    explicit: Option<Requirement<'_>>,
) -> RouteDecision {
    let Some(principal) = principal else {
        return RouteDecision::RedirectToLogin;
    };

    let requirement =
        explicit.unwrap_or_else(|| Requirement::any(route_map::required_permissions(path)));

    if has_permission(principal, requirement) {
        RouteDecision::RenderChildren
    } else {
        RouteDecision::RedirectToUnauthorized
    }
}

/// Inline guard: yields `content` when allowed, otherwise the fallback.
pub fn permission_guard<T>(
    principal: &Principal,
    requirement: Requirement<'_>,
    content: T,
    fallback: Option<T>,
) -> Option<T> {
    if has_permission(principal, requirement) {
        Some(content)
    } else {
        fallback
    }
}

/// Same as [`permission_guard`] but only builds the content when it will be shown.
pub fn permission_guard_with<T, F>(
    principal: &Principal,
    requirement: Requirement<'_>,
    content: F,
) -> Option<T>
where
    F: FnOnce() -> T,
{
    has_permission(principal, requirement).then(content)
}
