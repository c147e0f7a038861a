use async_trait::async_trait;

use crate::domain::entities::{NewRole, Role, RoleChanges};
use crate::domain::errors::DomainResult;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list_roles(&self) -> DomainResult<Vec<Role>>;
    async fn get_role_by_id(&self, id: i64) -> DomainResult<Option<Role>>;
    async fn get_role_by_name(&self, name: &str) -> DomainResult<Option<Role>>;
    async fn get_role_by_slug(&self, slug: &str) -> DomainResult<Option<Role>>;
    /// Inserts the role and returns its id.
    async fn create_role(&self, role: &NewRole) -> DomainResult<i64>;
    /// Inserts the role under a fixed id; used to seed reserved system roles.
    async fn create_role_with_id(&self, id: i64, role: &NewRole) -> DomainResult<()>;
    async fn update_role(&self, id: i64, changes: &RoleChanges) -> DomainResult<()>;
    async fn delete_role(&self, id: i64) -> DomainResult<()>;

    async fn count_users_with_role(&self, role_id: i64) -> DomainResult<i64>;
}
