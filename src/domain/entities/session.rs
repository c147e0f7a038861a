use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::shared::utils::timestamp::format_rfc3339;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub expires_at: String,
    pub last_accessed_at: String,
    pub created_at: String,
}

impl Session {
    pub fn new(user_id: String, token: String, duration_hours: i64) -> Self {
        let now = OffsetDateTime::now_utc();
        let expires_at = now + time::Duration::hours(duration_hours);

        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            token,
            expires_at: format_rfc3339(expires_at),
            last_accessed_at: format_rfc3339(now),
            created_at: format_rfc3339(now),
        }
    }

    /// Unparseable expiry timestamps count as expired.
    pub fn is_expired(&self) -> bool {
        match OffsetDateTime::parse(&self.expires_at, &Rfc3339) {
            Ok(expires_at) => expires_at < OffsetDateTime::now_utc(),
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_not_expired() {
        let session = Session::new("user-1".into(), "token".into(), 9);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_negative_duration_is_expired() {
        let session = Session::new("user-1".into(), "token".into(), -1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_garbage_expiry_is_expired() {
        let mut session = Session::new("user-1".into(), "token".into(), 9);
        session.expires_at = "not-a-date".into();
        assert!(session.is_expired());
    }
}
