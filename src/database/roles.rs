use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

use super::{map_db_error, Database};
use crate::domain::entities::{NewRole, Role, RoleChanges};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::role_repository::RoleRepository;
use crate::shared::utils::timestamp::now_rfc3339;

const ROLE_COLUMNS: &str = "r.id, r.name, r.slug, r.description, r.permissions,
        CAST(r.is_system AS INTEGER) AS is_system, CAST(r.is_active AS INTEGER) AS is_active,
        (SELECT COUNT(*) FROM users u WHERE u.role_id = r.id) AS user_count,
        r.created_at, r.updated_at";

fn role_from_row(row: &AnyRow) -> DomainResult<Role> {
    let permissions_json: String = row.try_get("permissions").map_err(map_db_error)?;
    let permissions: Vec<String> = serde_json::from_str(&permissions_json).map_err(|e| {
        DomainError::Internal(format!("Corrupt permission list on role: {}", e))
    })?;

    Ok(Role {
        id: row.try_get("id").map_err(map_db_error)?,
        name: row.try_get("name").map_err(map_db_error)?,
        slug: row.try_get("slug").map_err(map_db_error)?,
        description: row.try_get("description").ok(),
        permissions,
        is_system: row.try_get::<i64, _>("is_system").map_err(map_db_error)? != 0,
        is_active: row.try_get::<i64, _>("is_active").map_err(map_db_error)? != 0,
        user_count: row.try_get("user_count").map_err(map_db_error)?,
        created_at: row.try_get("created_at").map_err(map_db_error)?,
        updated_at: row.try_get("updated_at").map_err(map_db_error)?,
    })
}

fn permissions_json(permissions: &[String]) -> DomainResult<String> {
    serde_json::to_string(permissions)
        .map_err(|e| DomainError::Internal(format!("Serialization error: {}", e)))
}

impl Database {
    async fn fetch_role_where(&self, column: &str, value: &str) -> DomainResult<Option<Role>> {
        let sql = format!("SELECT {} FROM roles r WHERE r.{} = ?", ROLE_COLUMNS, column);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?;

        row.as_ref().map(role_from_row).transpose()
    }
}

#[async_trait]
impl RoleRepository for Database {
    async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let sql = format!("SELECT {} FROM roles r ORDER BY r.id", ROLE_COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)?;

        rows.iter().map(role_from_row).collect()
    }

    async fn get_role_by_id(&self, id: i64) -> DomainResult<Option<Role>> {
        let sql = format!("SELECT {} FROM roles r WHERE r.id = ?", ROLE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?;

        row.as_ref().map(role_from_row).transpose()
    }

    async fn get_role_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        self.fetch_role_where("name", name).await
    }

    async fn get_role_by_slug(&self, slug: &str) -> DomainResult<Option<Role>> {
        self.fetch_role_where("slug", slug).await
    }

    async fn create_role(&self, role: &NewRole) -> DomainResult<i64> {
        let result = sqlx::query(
            "INSERT INTO roles (name, slug, description, permissions, is_system, is_active,
                                created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&role.name)
        .bind(&role.slug)
        .bind(role.description.clone())
        .bind(permissions_json(&role.permissions)?)
        .bind(i64::from(role.is_system))
        .bind(i64::from(role.is_active))
        .bind(&role.created_at)
        .bind(&role.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;

        result
            .last_insert_id()
            .ok_or_else(|| DomainError::Internal("Role insert returned no id".to_string()))
    }

    async fn create_role_with_id(&self, id: i64, role: &NewRole) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO roles (id, name, slug, description, permissions, is_system, is_active,
                                created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&role.name)
        .bind(&role.slug)
        .bind(role.description.clone())
        .bind(permissions_json(&role.permissions)?)
        .bind(i64::from(role.is_system))
        .bind(i64::from(role.is_active))
        .bind(&role.created_at)
        .bind(&role.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn update_role(&self, id: i64, changes: &RoleChanges) -> DomainResult<()> {
        let mut builder = sqlx::QueryBuilder::new("UPDATE roles SET ");
        let mut separated = builder.separated(", ");

        if let Some(name) = &changes.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }

        if let Some(slug) = &changes.slug {
            separated.push("slug = ");
            separated.push_bind_unseparated(slug.clone());
        }

        if let Some(description) = &changes.description {
            // A blank description is stored as NULL, same as on insert
            separated.push("description = ");
            separated.push_bind_unseparated(
                Some(description.clone()).filter(|d| !d.is_empty()),
            );
        }

        if let Some(permissions) = &changes.permissions {
            separated.push("permissions = ");
            separated.push_bind_unseparated(permissions_json(permissions)?);
        }

        if let Some(is_active) = changes.is_active {
            separated.push("is_active = ");
            separated.push_bind_unseparated(i64::from(is_active));
        }

        separated.push("updated_at = ");
        separated.push_bind_unseparated(now_rfc3339());

        builder.push(" WHERE id = ");
        builder.push_bind(id);

        builder
            .build()
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn delete_role(&self, id: i64) -> DomainResult<()> {
        sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn count_users_with_role(&self, role_id: i64) -> DomainResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE role_id = ?")
            .bind(role_id)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?;

        row.try_get("count").map_err(map_db_error)
    }
}
