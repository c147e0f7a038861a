use async_trait::async_trait;

use crate::domain::entities::{User, UserChanges, UserQuery, UserStatus};
use crate::domain::errors::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> DomainResult<()>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn update_user(&self, id: &str, changes: &UserChanges) -> DomainResult<()>;
    async fn set_status(
        &self,
        id: &str,
        status: UserStatus,
        banned_reason: Option<&str>,
    ) -> DomainResult<()>;
    /// Marks the user banned and drops their sessions in one transaction.
    /// Returns the number of sessions revoked.
    async fn ban_user(&self, id: &str, banned_reason: Option<&str>) -> DomainResult<u64>;
    /// Soft-deletes the user and drops their sessions in one transaction.
    async fn soft_delete_user(&self, id: &str) -> DomainResult<()>;
    async fn restore_user(&self, id: &str) -> DomainResult<()>;
    async fn record_login(&self, id: &str) -> DomainResult<()>;
    /// Returns the requested page and the total number of matching users.
    async fn list_users(&self, query: &UserQuery) -> DomainResult<(Vec<User>, i64)>;
}
