use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Logical resource a request loads. Requests for different keys never
/// supersede each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKey {
    Session,
    Roles,
    Role(i64),
    Users,
    User(String),
    Permissions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub key: ResourceKey,
    pub seq: u64,
}

/// Issues strictly increasing sequence numbers. Shared between tasks that fire
/// requests; the store decides which ticket is current for each key.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, key: ResourceKey) -> Ticket {
        let seq = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Ticket { key, seq }
    }

    /// Last sequence number handed out, 0 if none.
    pub fn last_issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
