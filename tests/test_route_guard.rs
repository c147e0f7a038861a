/// Route guard and inline guard decisions
use vidadmin::domain::access::{Principal, Requirement};
use vidadmin::domain::guard::{
    evaluate_route, permission_guard, permission_guard_with, RouteDecision,
};

#[test]
fn test_unauthenticated_redirects_to_login_even_for_open_routes() {
    assert_eq!(evaluate_route(None, "/dashboard", None), RouteDecision::RedirectToLogin);
    assert_eq!(evaluate_route(None, "/help", None), RouteDecision::RedirectToLogin);
}

#[test]
fn test_route_map_decides_without_explicit_requirement() {
    let principal = Principal::new(["videos.view"]);

    assert_eq!(
        evaluate_route(Some(&principal), "/videos", None),
        RouteDecision::RenderChildren
    );
    assert_eq!(
        evaluate_route(Some(&principal), "/users", None),
        RouteDecision::RedirectToUnauthorized
    );
}

#[test]
fn test_explicit_requirement_overrides_route_map() {
    let principal = Principal::new(["videos.view"]);
    let required = ["videos.view", "videos.edit"];

    assert_eq!(
        evaluate_route(Some(&principal), "/videos", Some(Requirement::all(&required))),
        RouteDecision::RedirectToUnauthorized
    );
    assert_eq!(
        evaluate_route(Some(&principal), "/videos", Some(Requirement::any(&required))),
        RouteDecision::RenderChildren
    );
}

#[test]
fn test_super_admin_renders_everything() {
    let principal = Principal::default().with_role(1, "super-admin");
    let decision = evaluate_route(
        Some(&principal),
        "/settings",
        Some(Requirement::all(&["settings.view", "settings.edit"])),
    );
    assert!(decision.is_allowed());
}

#[test]
fn test_inline_guard_renders_content_or_fallback() {
    let editor = Principal::new(["videos.edit"]);
    let viewer = Principal::new(["videos.view"]);
    let requirement = Requirement::any(&["videos.edit"]);

    assert_eq!(
        permission_guard(&editor, requirement, "Edit", Some("Read only")),
        Some("Edit")
    );
    assert_eq!(
        permission_guard(&viewer, requirement, "Edit", Some("Read only")),
        Some("Read only")
    );
    assert_eq!(permission_guard(&viewer, requirement, "Edit", None), None);
}

#[test]
fn test_lazy_inline_guard_skips_construction_when_denied() {
    let viewer = Principal::new(["videos.view"]);
    let mut built = false;

    let rendered = permission_guard_with(&viewer, Requirement::any(&["videos.delete"]), || {
        built = true;
        "Delete"
    });

    assert_eq!(rendered, None);
    assert!(!built);
}
