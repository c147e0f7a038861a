/// Console reducer: last-request-wins sequencing, role drafts and notifications
use vidadmin::console::{
    reduce, Action, ConsoleState, NotificationLevel, RequestSequencer, ResourceKey,
};
use vidadmin::domain::access::Principal;
use vidadmin::domain::catalog;
use vidadmin::domain::entities::{PermissionCategory, UserStatus};
use vidadmin::domain::guard::RouteDecision;
use vidadmin::domain::selection::SelectionState;
use vidadmin::models::{RoleResponse, SessionResponse, UserListResponse, UserResponse};

fn role(id: i64, name: &str, permissions: &[&str]) -> RoleResponse {
    RoleResponse {
        id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        categories: Vec::new(),
        is_system: false,
        is_active: true,
        user_count: 0,
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

fn user(email: &str) -> UserResponse {
    UserResponse {
        id: email.to_string(),
        name: email.to_string(),
        email: email.to_string(),
        role_id: 4,
        role_slug: Some("moderator".to_string()),
        is_super_admin: false,
        status: UserStatus::Active,
        banned_reason: None,
        deleted_at: None,
        last_login_at: None,
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

fn page(page: i64, emails: &[&str]) -> UserListResponse {
    UserListResponse {
        users: emails.iter().map(|e| user(e)).collect(),
        total: 100,
        page,
        per_page: 20,
    }
}

fn session(principal: Principal) -> SessionResponse {
    SessionResponse {
        user: user("mod@example.com"),
        principal,
        is_super_admin: false,
        accessible_routes: Vec::new(),
        expires_at: "2026-01-01T09:00:00Z".to_string(),
    }
}

#[test]
fn test_slow_earlier_response_is_discarded() {
    let sequencer = RequestSequencer::new();
    let mut state = ConsoleState::new();

    let first = sequencer.issue(ResourceKey::Users);
    let second = sequencer.issue(ResourceKey::Users);
    state = reduce(state, Action::Requested(first.clone()));
    state = reduce(state, Action::Requested(second.clone()));
    assert!(state.users.loading);

    // Page 3 resolves first, then the stale page 2 response arrives
    state = reduce(
        state,
        Action::UsersLoaded {
            ticket: second,
            result: Ok(page(3, &["c@example.com"])),
        },
    );
    state = reduce(
        state,
        Action::UsersLoaded {
            ticket: first,
            result: Ok(page(2, &["b@example.com"])),
        },
    );

    let users = state.users.data.as_ref().unwrap();
    assert_eq!(users.page, 3);
    assert!(!state.users.loading);
    assert!(!state.is_pending(&ResourceKey::Users));
}

#[test]
fn test_keys_do_not_supersede_each_other() {
    let sequencer = RequestSequencer::new();
    let mut state = ConsoleState::new();

    let users = sequencer.issue(ResourceKey::Users);
    let roles = sequencer.issue(ResourceKey::Roles);
    state = reduce(state, Action::Requested(users.clone()));
    state = reduce(state, Action::Requested(roles.clone()));

    state = reduce(
        state,
        Action::UsersLoaded {
            ticket: users,
            result: Ok(page(1, &["a@example.com"])),
        },
    );
    state = reduce(
        state,
        Action::RolesLoaded {
            ticket: roles,
            result: Ok(vec![role(2, "Moderator", &["comments.view"])]),
        },
    );

    assert!(state.users.data.is_some());
    assert_eq!(state.roles.data.as_ref().unwrap().len(), 1);
}

#[test]
fn test_failed_load_keeps_data_and_notifies() {
    let sequencer = RequestSequencer::new();
    let mut state = ConsoleState::new();

    let ok = sequencer.issue(ResourceKey::Roles);
    state = reduce(state, Action::Requested(ok.clone()));
    state = reduce(
        state,
        Action::RolesLoaded {
            ticket: ok,
            result: Ok(vec![role(2, "Editors", &[])]),
        },
    );

    let failing = sequencer.issue(ResourceKey::Roles);
    state = reduce(state, Action::Requested(failing.clone()));
    state = reduce(
        state,
        Action::RolesLoaded {
            ticket: failing,
            result: Err("Forbidden: Missing required permissions".to_string()),
        },
    );

    assert_eq!(state.roles.data.as_ref().unwrap().len(), 1);
    assert_eq!(
        state.roles.error.as_deref(),
        Some("Forbidden: Missing required permissions")
    );
    let last = state.notifications.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
}

#[test]
fn test_role_draft_category_toggle() {
    let mut state = ConsoleState::new();
    state = reduce(state, Action::OpenRoleDraft(None));

    state = reduce(state, Action::TogglePermissionCategory(PermissionCategory::Users));
    let draft = state.draft.as_ref().unwrap();
    assert_eq!(
        draft.selection.category_state(PermissionCategory::Users),
        SelectionState::All
    );

    state = reduce(state, Action::TogglePermission("users.ban".to_string()));
    assert_eq!(
        state.draft.as_ref().unwrap().selection.category_state(PermissionCategory::Users),
        SelectionState::Some
    );

    // Partial becomes full, full becomes empty
    state = reduce(state, Action::TogglePermissionCategory(PermissionCategory::Users));
    state = reduce(state, Action::TogglePermissionCategory(PermissionCategory::Users));
    assert!(state.draft.as_ref().unwrap().selection.is_empty());

    state = reduce(state, Action::ToggleAllPermissions);
    assert_eq!(
        state.draft.as_ref().unwrap().selection.len(),
        catalog::all().len()
    );
}

#[test]
fn test_role_draft_builds_requests() {
    let existing = role(5, "Curators", &["playlists.edit", "playlists.view", "gone.perm"]);
    let mut state = reduce(ConsoleState::new(), Action::OpenRoleDraft(Some(existing)));

    state = reduce(state, Action::DraftNameChanged("  Playlist Curators ".to_string()));
    state = reduce(state, Action::DraftDescriptionChanged("   ".to_string()));

    let draft = state.draft.as_ref().unwrap();
    assert_eq!(draft.role_id, Some(5));

    let update = draft.to_update_request();
    assert_eq!(update.name.as_deref(), Some("Playlist Curators"));
    // A cleared field is sent as empty so the stored description is cleared too
    assert_eq!(update.description.as_deref(), Some(""));
    assert_eq!(
        update.permissions,
        Some(vec!["playlists.view".to_string(), "playlists.edit".to_string()])
    );

    let create = draft.to_create_request();
    assert_eq!(create.permissions, vec!["playlists.view", "playlists.edit"]);
}

#[test]
fn test_saved_and_deleted_roles_update_list() {
    let mut state = ConsoleState::new();
    state = reduce(state, Action::OpenRoleDraft(None));
    state = reduce(state, Action::RoleSaved(role(7, "Editors", &["videos.view"])));

    assert!(state.draft.is_none());
    assert_eq!(state.roles.data.as_ref().unwrap().len(), 1);
    assert_eq!(state.notifications[0].level, NotificationLevel::Success);

    state = reduce(state, Action::RoleSaved(role(7, "Video Editors", &[])));
    let roles = state.roles.data.as_ref().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "Video Editors");

    state = reduce(state, Action::RoleDeleted(7));
    assert!(state.roles.data.as_ref().unwrap().is_empty());

    state = reduce(state, Action::Dismiss(0));
    state = reduce(state, Action::Dismiss(42));
    assert_eq!(state.notifications.len(), 2);
}

#[test]
fn test_session_drives_guards() {
    let sequencer = RequestSequencer::new();
    let mut state = ConsoleState::new();
    assert_eq!(state.route_decision("/dashboard"), RouteDecision::RedirectToLogin);
    assert!(!state.can("comments.view"));

    let ticket = sequencer.issue(ResourceKey::Session);
    state = reduce(state, Action::Requested(ticket.clone()));
    state = reduce(
        state,
        Action::SessionLoaded {
            ticket,
            result: Ok(session(
                Principal::new(["comments.view"]).with_role(4, "moderator"),
            )),
        },
    );

    assert_eq!(state.route_decision("/comments"), RouteDecision::RenderChildren);
    assert_eq!(
        state.route_decision("/users"),
        RouteDecision::RedirectToUnauthorized
    );
    assert!(state.can("comments.view"));
    assert!(state.can_access("/dashboard"));
    assert!(!state.can_access("/settings"));

    state = reduce(state, Action::SignedOut);
    assert!(state.principal().is_none());
    assert_eq!(state.route_decision("/comments"), RouteDecision::RedirectToLogin);
}
