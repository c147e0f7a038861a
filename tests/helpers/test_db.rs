use std::env;
use uuid::Uuid;
use vidadmin::bootstrap;
use vidadmin::config::Config;
use vidadmin::database::Database;

pub const TEST_PASSWORD: &str = "Str0ng!Passw0rd";

/// Fresh file-backed SQLite database with migrations applied and system roles seeded.
/// Each call gets its own file so tests can run in parallel.
pub async fn setup_test_db() -> Database {
    let path = env::temp_dir().join(format!("vidadmin_test_{}.db", Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", path.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    bootstrap::seed_system_roles(&db)
        .await
        .expect("Failed to seed system roles");

    db
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        admin_email: "root@vidadmin.test".to_string(),
        admin_password: TEST_PASSWORD.to_string(),
        admin_name: "Root".to_string(),
        session_duration_hours: 9,
        search_debounce_ms: 500,
        cors_allowed_origin: None,
    }
}

pub async fn teardown_test_db(db: Database) {
    db.close().await;
}
