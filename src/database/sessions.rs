use async_trait::async_trait;
use sqlx::Row;

use super::{map_db_error, Database};
use crate::domain::entities::Session;
use crate::domain::errors::DomainResult;
use crate::domain::ports::session_repository::SessionRepository;
use crate::shared::utils::timestamp::now_rfc3339;

#[async_trait]
impl SessionRepository for Database {
    async fn create_session(&self, session: &Session) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, token, expires_at, last_accessed_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.token)
        .bind(&session.expires_at)
        .bind(&session.last_accessed_at)
        .bind(&session.created_at)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn get_session_by_token(&self, token: &str) -> DomainResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, user_id, token, expires_at, last_accessed_at, created_at
             FROM sessions
             WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(self.pool())
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Session {
            id: row.try_get("id").map_err(map_db_error)?,
            user_id: row.try_get("user_id").map_err(map_db_error)?,
            token: row.try_get("token").map_err(map_db_error)?,
            expires_at: row.try_get("expires_at").map_err(map_db_error)?,
            last_accessed_at: row.try_get("last_accessed_at").map_err(map_db_error)?,
            created_at: row.try_get("created_at").map_err(map_db_error)?,
        }))
    }

    async fn delete_session(&self, token: &str) -> DomainResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: &str) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    async fn cleanup_expired_sessions(&self) -> DomainResult<u64> {
        // Expiry is stored as a UTC RFC 3339 string
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now_rfc3339())
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    async fn update_session_last_accessed(&self, token: &str) -> DomainResult<()> {
        sqlx::query("UPDATE sessions SET last_accessed_at = ? WHERE token = ?")
            .bind(now_rfc3339())
            .bind(token)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
