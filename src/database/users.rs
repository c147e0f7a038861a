use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::{Any, QueryBuilder, Row};

use super::{map_db_error, Database};
use crate::domain::entities::{User, UserChanges, UserQuery, UserStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::user_repository::UserRepository;
use crate::shared::utils::timestamp::now_rfc3339;

const USER_COLUMNS: &str = "u.id, u.name, u.email, u.password_hash, u.role_id, r.slug AS role_slug,
        u.status, u.banned_reason, u.deleted_at, u.last_login_at, u.created_at, u.updated_at";

const SET_STATUS_SQL: &str =
    "UPDATE users SET status = ?, banned_reason = ?, updated_at = ? WHERE id = ?";

fn user_from_row(row: &AnyRow) -> DomainResult<User> {
    let status: String = row.try_get("status").map_err(map_db_error)?;

    Ok(User {
        id: row.try_get("id").map_err(map_db_error)?,
        name: row.try_get("name").map_err(map_db_error)?,
        email: row.try_get("email").map_err(map_db_error)?,
        password_hash: row.try_get("password_hash").map_err(map_db_error)?,
        role_id: row.try_get("role_id").map_err(map_db_error)?,
        role_slug: row.try_get("role_slug").ok(),
        status: status.parse::<UserStatus>().map_err(DomainError::Internal)?,
        banned_reason: row.try_get("banned_reason").ok(),
        deleted_at: row.try_get("deleted_at").ok(),
        last_login_at: row.try_get("last_login_at").ok(),
        created_at: row.try_get("created_at").map_err(map_db_error)?,
        updated_at: row.try_get("updated_at").map_err(map_db_error)?,
    })
}

/// Escapes LIKE wildcards so user input matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_filters(builder: &mut QueryBuilder<'_, Any>, query: &UserQuery) {
    builder.push(" WHERE 1 = 1");

    if !query.include_deleted {
        builder.push(" AND u.deleted_at IS NULL");
    }

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        builder.push(" AND (LOWER(u.name) LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR LOWER(u.email) LIKE ");
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\')");
    }
}

impl Database {
    async fn fetch_user_where(&self, column: &str, value: &str) -> DomainResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users u LEFT JOIN roles r ON r.id = u.role_id WHERE u.{} = ?",
            USER_COLUMNS, column
        );
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn touch_user(&self, sql: &str, id: &str) -> DomainResult<()> {
        let result = sqlx::query(sql)
            .bind(now_rfc3339())
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for Database {
    async fn create_user(&self, user: &User) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role_id, status, banned_reason,
                                deleted_at, last_login_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id)
        .bind(user.status.to_string())
        .bind(user.banned_reason.clone())
        .bind(user.deleted_at.clone())
        .bind(user.last_login_at.clone())
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.fetch_user_where("id", id).await
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.fetch_user_where("email", email).await
    }

    async fn update_user(&self, id: &str, changes: &UserChanges) -> DomainResult<()> {
        let mut builder = QueryBuilder::<Any>::new("UPDATE users SET ");
        let mut separated = builder.separated(", ");

        if let Some(name) = &changes.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }

        if let Some(email) = &changes.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email.clone());
        }

        if let Some(role_id) = changes.role_id {
            separated.push("role_id = ");
            separated.push_bind_unseparated(role_id);
        }

        separated.push("updated_at = ");
        separated.push_bind_unseparated(now_rfc3339());

        builder.push(" WHERE id = ");
        builder.push_bind(id.to_string());

        builder
            .build()
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn set_status(
        &self,
        id: &str,
        status: UserStatus,
        banned_reason: Option<&str>,
    ) -> DomainResult<()> {
        let result = sqlx::query(SET_STATUS_SQL)
            .bind(status.to_string())
            .bind(banned_reason.map(str::to_string))
            .bind(now_rfc3339())
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    async fn ban_user(&self, id: &str, banned_reason: Option<&str>) -> DomainResult<u64> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let result = sqlx::query(SET_STATUS_SQL)
            .bind(UserStatus::Banned.to_string())
            .bind(banned_reason.map(str::to_string))
            .bind(now_rfc3339())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User with id {} not found", id)));
        }

        let revoked = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        tx.commit().await.map_err(map_db_error)?;
        Ok(revoked)
    }

    async fn soft_delete_user(&self, id: &str) -> DomainResult<()> {
        let now = now_rfc3339();
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let result = sqlx::query("UPDATE users SET deleted_at = ?, updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(&now)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User with id {} not found", id)));
        }

        // A deleted account keeps no live sessions
        sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    async fn restore_user(&self, id: &str) -> DomainResult<()> {
        self.touch_user(
            "UPDATE users SET deleted_at = NULL, updated_at = ? WHERE id = ?",
            id,
        )
        .await
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        self.touch_user("UPDATE users SET last_login_at = ? WHERE id = ?", id)
            .await
    }

    async fn list_users(&self, query: &UserQuery) -> DomainResult<(Vec<User>, i64)> {
        let mut count_builder = QueryBuilder::<Any>::new("SELECT COUNT(*) AS count FROM users u");
        push_filters(&mut count_builder, query);
        let total: i64 = count_builder
            .build()
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?
            .try_get("count")
            .map_err(map_db_error)?;

        let mut builder = QueryBuilder::<Any>::new(format!(
            "SELECT {} FROM users u LEFT JOIN roles r ON r.id = u.role_id",
            USER_COLUMNS
        ));
        push_filters(&mut builder, query);
        builder.push(" ORDER BY u.created_at DESC, u.id LIMIT ");
        builder.push_bind(query.limit);
        builder.push(" OFFSET ");
        builder.push_bind(query.offset);

        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)?;

        let users = rows.iter().map(user_from_row).collect::<DomainResult<Vec<_>>>()?;
        Ok((users, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Ann"), "%ann%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
