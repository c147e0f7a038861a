use std::sync::Arc;

use crate::api::middleware::{ApiError, AppState};
use crate::config::Config;
use crate::database::Database;
use crate::domain::catalog;
use crate::domain::entities::{NewRole, SUPER_ADMIN_ROLE_ID};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::services::UserDomainService;
use crate::services::auth::{hash_password, validate_password_complexity};
use crate::services::{AuthService, RoleService, SessionService, UserService};

/// Platform-defined roles. The super-admin role always takes the reserved id.
fn system_roles() -> Vec<(Option<i64>, NewRole)> {
    let strings = |ids: &[&str]| ids.iter().map(|id| id.to_string()).collect::<Vec<_>>();
    let everything: Vec<String> = catalog::all().iter().map(|p| p.id.to_string()).collect();

    vec![
        (
            Some(SUPER_ADMIN_ROLE_ID),
            NewRole::system(
                "Super Admin",
                "super-admin",
                "Unrestricted access to every console feature",
                everything,
            ),
        ),
        (
            None,
            NewRole::system(
                "Moderator",
                "moderator",
                "Reviews comments and reports",
                strings(&[
                    "dashboard.view",
                    "comments.view",
                    "comments.moderate",
                    "comments.delete",
                    "reports.view",
                    "reports.resolve",
                ]),
            ),
        ),
        (
            None,
            NewRole::system(
                "Support Agent",
                "support-agent",
                "Handles support tickets",
                strings(&[
                    "dashboard.view",
                    "users.view",
                    "support.view",
                    "support.reply",
                    "support.close",
                ]),
            ),
        ),
    ]
}

/// Inserts missing system roles; existing rows are left untouched.
pub async fn seed_system_roles(db: &Database) -> Result<(), ApiError> {
    for (id, role) in system_roles() {
        if db.get_role_by_slug(&role.slug).await?.is_some() {
            continue;
        }

        match id {
            Some(id) => db.create_role_with_id(id, &role).await?,
            None => {
                db.create_role(&role).await?;
            }
        }
        tracing::info!("Seeded system role '{}'", role.slug);
    }

    Ok(())
}

pub async fn initialize_admin(db: &Database, config: &Config) -> Result<(), ApiError> {
    tracing::info!("Checking for super-admin initialization");

    let users = UserDomainService::new(
        Arc::new(db.clone()) as Arc<dyn UserRepository>,
        Arc::new(db.clone()) as Arc<dyn RoleRepository>,
    );

    if users.find_by_email(&config.admin_email).await?.is_some() {
        tracing::info!("Super-admin already exists: {}", config.admin_email);
        return Ok(());
    }

    tracing::info!("Creating super-admin: {}", config.admin_email);

    validate_password_complexity(&config.admin_password)?;
    let password_hash = hash_password(&config.admin_password)?;

    users
        .create_user(
            config.admin_name.clone(),
            config.admin_email.clone(),
            password_hash,
            SUPER_ADMIN_ROLE_ID,
        )
        .await?;

    tracing::info!("Super-admin created successfully: {}", config.admin_email);
    Ok(())
}

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let role_repo: Arc<dyn RoleRepository> = Arc::new(db.clone());
    let user_repo: Arc<dyn UserRepository> = Arc::new(db.clone());
    let session_repo: Arc<dyn SessionRepository> = Arc::new(db);

    let session_service = SessionService::new(session_repo);
    let role_service = RoleService::new(role_repo.clone());
    let user_service = UserService::new(user_repo, role_repo.clone());
    let auth_service = AuthService::new(
        user_service.domain().clone(),
        role_repo,
        session_service.clone(),
        config.session_duration_hours,
    );
    tracing::info!("Application services initialized");

    AppState {
        session_duration_hours: config.session_duration_hours,
        auth_service,
        role_service,
        user_service,
        session_service,
    }
}

/// Periodically removes expired sessions until the task is aborted.
pub fn spawn_session_cleanup(
    session_service: SessionService,
    every: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match session_service.cleanup_expired_sessions().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!("Removed {} expired sessions", removed),
                Err(e) => tracing::error!("Session cleanup failed: {}", e),
            }
        }
    })
}
