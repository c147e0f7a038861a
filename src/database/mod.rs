use sqlx::{any::AnyPoolOptions, AnyPool};

use crate::domain::errors::DomainError;

pub mod roles;
pub mod sessions;
pub mod users;

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();

        let is_sqlite = database_url.starts_with("sqlite");
        let pool = AnyPoolOptions::new()
            .max_connections(20)
            .min_connections(1)
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    // Foreign keys are a per-connection setting in SQLite
                    if is_sqlite {
                        sqlx::query("PRAGMA foreign_keys = ON")
                            .execute(conn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Maps a driver error onto the domain; unique-constraint violations become conflicts.
pub(crate) fn map_db_error(error: sqlx::Error) -> DomainError {
    match &error {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            if message.contains("UNIQUE") || message.contains("unique") {
                DomainError::Conflict(format!("Duplicate value: {}", message))
            } else if message.contains("FOREIGN KEY") {
                DomainError::Conflict(format!("Referenced record constraint: {}", message))
            } else {
                DomainError::Internal(format!("Database error: {}", message))
            }
        }
        _ => DomainError::internal(error),
    }
}
