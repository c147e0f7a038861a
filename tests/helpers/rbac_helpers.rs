#![allow(dead_code)]
use std::sync::Arc;

use vidadmin::api::middleware::AuthenticatedUser;
use vidadmin::database::Database;
use vidadmin::domain::access::Principal;
use vidadmin::domain::entities::{Role, Session, User, SUPER_ADMIN_ROLE_ID};
use vidadmin::domain::ports::role_repository::RoleRepository;
use vidadmin::domain::ports::session_repository::SessionRepository;
use vidadmin::domain::ports::user_repository::UserRepository;
use vidadmin::domain::services::{RoleDomainService, UserDomainService};
use vidadmin::services::auth::{generate_session_token, hash_password};

use super::test_db::TEST_PASSWORD;

pub fn role_service(db: &Database) -> RoleDomainService {
    RoleDomainService::new(Arc::new(db.clone()) as Arc<dyn RoleRepository>)
}

pub fn user_service(db: &Database) -> UserDomainService {
    UserDomainService::new(
        Arc::new(db.clone()) as Arc<dyn UserRepository>,
        Arc::new(db.clone()) as Arc<dyn RoleRepository>,
    )
}

/// Create a custom (non-system) role with the given catalog permissions
pub async fn create_test_role(db: &Database, name: &str, permissions: &[&str]) -> Role {
    role_service(db)
        .create_role(
            name.to_string(),
            Some(format!("{} test role", name)),
            permissions.iter().map(|p| p.to_string()).collect(),
        )
        .await
        .expect("Failed to create test role")
}

pub async fn get_role_by_slug(db: &Database, slug: &str) -> Role {
    db.get_role_by_slug(slug)
        .await
        .expect("Failed to query role")
        .expect("Role should exist")
}

/// Create a user whose password is `TEST_PASSWORD`
pub async fn create_test_user(db: &Database, email: &str, role_id: i64) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("Failed to hash password");
    let name = email.split('@').next().unwrap_or("user").to_string();

    user_service(db)
        .create_user(name, email.to_string(), password_hash, role_id)
        .await
        .expect("Failed to create test user")
}

/// Build the authenticated caller for `user`, backed by a real session row
pub async fn auth_user_for(db: &Database, user: &User) -> AuthenticatedUser {
    let role = db
        .get_role_by_id(user.role_id)
        .await
        .expect("Failed to query role");
    let principal = match role {
        Some(role) => Principal::from_role(&role),
        None => Principal::default().with_role_id(user.role_id),
    };

    let session = Session::new(user.id.clone(), generate_session_token(), 9);
    db.create_session(&session)
        .await
        .expect("Failed to create session");

    AuthenticatedUser {
        user: user.clone(),
        principal,
        token: session.token.clone(),
        session,
    }
}

pub async fn create_super_admin(db: &Database, email: &str) -> AuthenticatedUser {
    let user = create_test_user(db, email, SUPER_ADMIN_ROLE_ID).await;
    auth_user_for(db, &user).await
}

/// A user on a fresh custom role holding exactly `permissions`
pub async fn create_user_with_permissions(
    db: &Database,
    email: &str,
    permissions: &[&str],
) -> AuthenticatedUser {
    let role_name = format!("Role for {}", email.replace(['@', '.'], " "));
    let role = create_test_role(db, &role_name, permissions).await;
    let user = create_test_user(db, email, role.id).await;
    auth_user_for(db, &user).await
}
