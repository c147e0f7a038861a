//! Single-owner console state and its reducer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::console::notify::Notification;
use crate::console::sequencer::{ResourceKey, Ticket};
use crate::domain::access::{self, Principal, Requirement};
use crate::domain::entities::PermissionCategory;
use crate::domain::guard::{self, RouteDecision};
use crate::domain::selection::PermissionSelection;
use crate::models::{
    CreateRoleRequest, RoleResponse, SessionResponse, UpdateRoleRequest, UserListResponse,
};

#[derive(Debug, Clone)]
pub struct Resource<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Resource<T> {
    fn settle(&mut self, result: Result<T, String>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }
}

/// Role being created (`role_id == None`) or edited in the role form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    pub role_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub selection: PermissionSelection,
}

impl RoleDraft {
    pub fn from_role(role: &RoleResponse) -> Self {
        Self {
            role_id: Some(role.id),
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            selection: PermissionSelection::from_ids(&role.permissions),
        }
    }

    pub fn to_create_request(&self) -> CreateRoleRequest {
        let description = self.description.trim();
        CreateRoleRequest {
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            permissions: self.selection.clone().into_vec(),
        }
    }

    pub fn to_update_request(&self) -> UpdateRoleRequest {
        UpdateRoleRequest {
            name: Some(self.name.trim().to_string()),
            // Always sent so that clearing the field clears the stored description
            description: Some(self.description.trim().to_string()),
            permissions: Some(self.selection.clone().into_vec()),
            is_active: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    pub session: Resource<SessionResponse>,
    pub roles: Resource<Vec<RoleResponse>>,
    pub users: Resource<UserListResponse>,
    pub user_search: String,
    pub draft: Option<RoleDraft>,
    pub notifications: Vec<Notification>,
    /// Newest outstanding sequence number per resource.
    pending: BTreeMap<ResourceKey, u64>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.session.data.as_ref().map(|s| &s.principal)
    }

    pub fn is_pending(&self, key: &ResourceKey) -> bool {
        self.pending.contains_key(key)
    }

    /// Route guard decision for a console path.
    pub fn route_decision(&self, path: &str) -> RouteDecision {
        guard::evaluate_route(self.principal(), path, None)
    }

    pub fn can(&self, permission: &str) -> bool {
        self.principal()
            .map(|p| access::has_permission(p, Requirement::any(&[permission])))
            .unwrap_or(false)
    }

    pub fn can_access(&self, path: &str) -> bool {
        self.principal()
            .map(|p| access::can_access_route(p, path))
            .unwrap_or(false)
    }

    fn resource_loading(&mut self, key: &ResourceKey, loading: bool) {
        match key {
            ResourceKey::Session => self.session.loading = loading,
            ResourceKey::Roles => self.roles.loading = loading,
            ResourceKey::Users => self.users.loading = loading,
            _ => {}
        }
    }

    /// Accepts a response only if its ticket is still the newest for its key.
    fn accept(&mut self, ticket: &Ticket) -> bool {
        if self.pending.get(&ticket.key) != Some(&ticket.seq) {
            tracing::debug!(
                "Discarding stale response for {:?} (seq {})",
                ticket.key,
                ticket.seq
            );
            return false;
        }
        self.pending.remove(&ticket.key);
        true
    }

    fn report<T>(&mut self, result: &Result<T, String>) {
        if let Err(message) = result {
            self.notifications.push(Notification::error(message.clone()));
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Requested(Ticket),
    SessionLoaded {
        ticket: Ticket,
        result: Result<SessionResponse, String>,
    },
    RolesLoaded {
        ticket: Ticket,
        result: Result<Vec<RoleResponse>, String>,
    },
    UsersLoaded {
        ticket: Ticket,
        result: Result<UserListResponse, String>,
    },
    SignedOut,
    UserSearchChanged(String),
    OpenRoleDraft(Option<RoleResponse>),
    DraftNameChanged(String),
    DraftDescriptionChanged(String),
    TogglePermission(String),
    TogglePermissionCategory(PermissionCategory),
    ToggleAllPermissions,
    CloseRoleDraft,
    RoleSaved(RoleResponse),
    RoleDeleted(i64),
    Notify(Notification),
    Dismiss(usize),
}

pub fn reduce(mut state: ConsoleState, action: Action) -> ConsoleState {
    match action {
        Action::Requested(ticket) => {
            let newest = state.pending.entry(ticket.key.clone()).or_insert(0);
            if ticket.seq > *newest {
                *newest = ticket.seq;
                state.resource_loading(&ticket.key, true);
            }
        }
        Action::SessionLoaded { ticket, result } => {
            if state.accept(&ticket) {
                state.report(&result);
                state.session.settle(result);
            }
        }
        Action::RolesLoaded { ticket, result } => {
            if state.accept(&ticket) {
                state.report(&result);
                state.roles.settle(result);
            }
        }
        Action::UsersLoaded { ticket, result } => {
            if state.accept(&ticket) {
                state.report(&result);
                state.users.settle(result);
            }
        }
        Action::SignedOut => return ConsoleState::default(),
        Action::UserSearchChanged(query) => state.user_search = query,
        Action::OpenRoleDraft(role) => {
            state.draft = Some(role.as_ref().map(RoleDraft::from_role).unwrap_or_default());
        }
        Action::DraftNameChanged(name) => {
            if let Some(draft) = state.draft.as_mut() {
                draft.name = name;
            }
        }
        Action::DraftDescriptionChanged(description) => {
            if let Some(draft) = state.draft.as_mut() {
                draft.description = description;
            }
        }
        Action::TogglePermission(id) => {
            if let Some(draft) = state.draft.as_mut() {
                draft.selection.toggle(&id);
            }
        }
        Action::TogglePermissionCategory(category) => {
            if let Some(draft) = state.draft.as_mut() {
                draft.selection.toggle_category(category);
            }
        }
        Action::ToggleAllPermissions => {
            if let Some(draft) = state.draft.as_mut() {
                draft.selection.toggle_all();
            }
        }
        Action::CloseRoleDraft => state.draft = None,
        Action::RoleSaved(role) => {
            let message = format!("Role '{}' saved", role.name);
            let roles = state.roles.data.get_or_insert_with(Vec::new);
            match roles.iter_mut().find(|r| r.id == role.id) {
                Some(existing) => *existing = role,
                None => roles.push(role),
            }
            state.draft = None;
            state.notifications.push(Notification::success(message));
        }
        Action::RoleDeleted(id) => {
            if let Some(roles) = state.roles.data.as_mut() {
                roles.retain(|r| r.id != id);
            }
            if state.draft.as_ref().and_then(|d| d.role_id) == Some(id) {
                state.draft = None;
            }
            state.notifications.push(Notification::success("Role deleted"));
        }
        Action::Notify(notification) => state.notifications.push(notification),
        Action::Dismiss(index) => {
            if index < state.notifications.len() {
                state.notifications.remove(index);
            }
        }
    }

    state
}
