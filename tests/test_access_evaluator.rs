/// Access evaluator properties: match modes, super-admin bypass, route map lookups
use vidadmin::domain::access::{
    accessible_routes, can_access_route, has_all_permissions, has_any_permission,
    has_permission, is_super_admin, Principal, Requirement,
};
use vidadmin::domain::catalog;
use vidadmin::domain::route_map;

fn no_permissions() -> Principal {
    Principal::new(Vec::<String>::new())
}

#[test]
fn test_all_mode_requires_subset() {
    let principal = Principal::new(["videos.view", "videos.edit", "channels.view"]);

    assert!(has_all_permissions(&principal, &["videos.view", "videos.edit"]));
    assert!(!has_all_permissions(&principal, &["videos.view", "videos.delete"]));
}

#[test]
fn test_any_mode_requires_intersection() {
    let principal = Principal::new(["videos.view"]);

    assert!(has_any_permission(&principal, &["videos.view", "videos.edit"]));
    assert!(!has_any_permission(&principal, &["videos.edit", "videos.delete"]));
}

#[test]
fn test_single_permission_scenario() {
    let principal = Principal::new(["videos.view"]);
    let required = ["videos.view", "videos.edit"];

    assert!(has_permission(&principal, Requirement::any(&required)));
    assert!(!has_permission(&principal, Requirement::all(&required)));
}

#[test]
fn test_empty_requirement_is_satisfied() {
    assert!(has_permission(&no_permissions(), Requirement::NONE));
    assert!(has_all_permissions(&no_permissions(), &[]));
}

#[test]
fn test_super_admin_by_slug_bypasses_everything() {
    let principal = no_permissions().with_role(7, "super-admin");

    assert!(is_super_admin(&principal));
    assert!(has_all_permissions(&principal, &["settings.edit", "users.delete"]));
    assert!(has_permission(&principal, Requirement::any(&["not.in.catalog"])));
}

#[test]
fn test_super_admin_by_reserved_role_id() {
    // Slug says otherwise, the reserved id wins
    let principal = no_permissions().with_role(1, "content-manager");
    assert!(is_super_admin(&principal));

    let routes = accessible_routes(&principal);
    assert_eq!(routes.len(), route_map::routes().count());
    for binding in route_map::routes() {
        assert!(can_access_route(&principal, binding.path), "{}", binding.path);
    }
}

#[test]
fn test_super_admin_by_denormalized_role_id() {
    let principal = no_permissions().with_role_id(1);
    assert!(is_super_admin(&principal));
    assert!(can_access_route(&principal, "/settings"));
}

#[test]
fn test_regular_role_is_not_super_admin() {
    let principal = Principal::new(["users.view"]).with_role(4, "moderator").with_role_id(4);
    assert!(!is_super_admin(&principal));
    assert!(!can_access_route(&principal, "/settings"));
}

#[test]
fn test_unmapped_routes_are_always_accessible() {
    let principal = no_permissions();

    assert!(can_access_route(&principal, "/help"));
    assert!(can_access_route(&principal, "/some/unknown/page"));
    assert!(route_map::required_permissions("/help").is_empty());
}

#[test]
fn test_moderator_without_permissions() {
    let principal = no_permissions().with_role(4, "moderator");

    assert!(can_access_route(&principal, "/dashboard"));
    assert!(!can_access_route(&principal, "/users"));
    assert!(!can_access_route(&principal, "/users/abc/edit"));
}

#[test]
fn test_parameterized_routes_use_their_own_entry() {
    let viewer = Principal::new(["users.view"]);

    assert!(can_access_route(&viewer, "/users"));
    assert!(can_access_route(&viewer, "/users/42"));
    assert!(!can_access_route(&viewer, "/users/create"));
    assert!(!can_access_route(&viewer, "/users/42/edit"));
}

#[test]
fn test_route_lists_use_any_semantics() {
    // /permissions is mapped to [permissions.view, roles.view]
    let principal = Principal::new(["roles.view"]);
    assert!(can_access_route(&principal, "/permissions"));
}

#[test]
fn test_accessible_routes_are_monotonic() {
    let ids: Vec<&str> = catalog::all().iter().map(|p| p.id).collect();

    let mut previous: Vec<&str> = accessible_routes(&no_permissions());
    for end in 1..=ids.len() {
        let principal = Principal::new(ids[..end].iter().copied());
        let current = accessible_routes(&principal);

        for route in &previous {
            assert!(
                current.contains(route),
                "adding {} removed access to {}",
                ids[end - 1],
                route
            );
        }
        previous = current;
    }

    assert_eq!(previous.len(), route_map::routes().count());
}

#[test]
fn test_accessible_routes_for_empty_principal_are_open_routes() {
    let routes = accessible_routes(&no_permissions());
    let open: Vec<&str> = route_map::routes()
        .filter(|b| b.permissions.is_empty())
        .map(|b| b.path)
        .collect();

    assert_eq!(routes, open);
    assert!(routes.contains(&"/dashboard"));
}

#[test]
fn test_every_mapped_permission_is_in_catalog() {
    for binding in route_map::routes() {
        for permission in binding.permissions {
            assert!(
                catalog::contains(permission),
                "{} maps unknown permission {}",
                binding.path,
                permission
            );
        }
    }
}
