/// System roles are seeded at startup and cannot be changed or removed
mod helpers;
use std::sync::Arc;

use helpers::*;
use vidadmin::api::middleware::ApiError;
use vidadmin::bootstrap;
use vidadmin::domain::{access, catalog};
use vidadmin::domain::entities::SUPER_ADMIN_ROLE_ID;
use vidadmin::models::{TogglePermissionsRequest, UpdateRoleRequest};
use vidadmin::services::RoleService;

#[tokio::test]
async fn test_super_admin_role_uses_reserved_id() {
    let db = setup_test_db().await;

    let role = get_role_by_slug(&db, "super-admin").await;
    assert_eq!(role.id, SUPER_ADMIN_ROLE_ID);
    assert!(role.is_system);
    assert!(access::is_super_admin(&access::Principal::from_role(&role)));
    assert_eq!(role.permissions.len(), catalog::all().len());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let db = setup_test_db().await;
    let before = role_service(&db).list_roles().await.unwrap().len();

    bootstrap::seed_system_roles(&db).await.unwrap();
    bootstrap::seed_system_roles(&db).await.unwrap();

    let after = role_service(&db).list_roles().await.unwrap().len();
    assert_eq!(before, after);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_cannot_update_system_role() {
    let db = setup_test_db().await;
    let admin = create_super_admin(&db, "root@example.com").await;
    let roles = RoleService::new(Arc::new(db.clone()));
    let moderator = get_role_by_slug(&db, "moderator").await;

    let result = roles
        .update_role(
            &admin,
            moderator.id,
            UpdateRoleRequest {
                name: Some("Modified Moderator".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert_eq!(
        result.unwrap_err(),
        ApiError::Forbidden("Cannot modify system role".to_string())
    );

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_cannot_toggle_system_role() {
    let db = setup_test_db().await;
    let admin = create_super_admin(&db, "root@example.com").await;
    let roles = RoleService::new(Arc::new(db.clone()));

    let result = roles
        .toggle_permissions(
            &admin,
            SUPER_ADMIN_ROLE_ID,
            TogglePermissionsRequest { category: None },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_cannot_delete_system_role() {
    let db = setup_test_db().await;
    let admin = create_super_admin(&db, "root@example.com").await;
    let roles = RoleService::new(Arc::new(db.clone()));

    let result = roles.delete(&admin, SUPER_ADMIN_ROLE_ID).await;
    assert_eq!(
        result.unwrap_err(),
        ApiError::Forbidden("Cannot delete system role".to_string())
    );

    let still_there = roles.get_role(SUPER_ADMIN_ROLE_ID).await;
    assert!(still_there.is_ok());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_initialize_admin_creates_super_admin_once() {
    let db = setup_test_db().await;
    let config = test_config();

    bootstrap::initialize_admin(&db, &config).await.unwrap();
    bootstrap::initialize_admin(&db, &config).await.unwrap();

    let users = user_service(&db);
    let admin = users
        .find_by_email(&config.admin_email)
        .await
        .unwrap()
        .expect("admin should exist");
    assert_eq!(admin.role_id, SUPER_ADMIN_ROLE_ID);
    assert!(admin.is_super_admin());

    let page = users.list_users(None, None, None, false).await.unwrap();
    assert_eq!(page.total, 1);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_initialize_admin_rejects_weak_password() {
    let db = setup_test_db().await;
    let mut config = test_config();
    config.admin_password = "password".to_string();

    let result = bootstrap::initialize_admin(&db, &config).await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    teardown_test_db(db).await;
}
