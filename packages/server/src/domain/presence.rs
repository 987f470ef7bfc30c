//! Presence Tracker
//!
//! ユーザー ID ごとのオンライン/オフライン状態。ルーム所属とは独立して管理し、
//! エントリは削除しない。

use std::collections::HashMap;

use super::value_object::UserId;

#[derive(Debug, Default)]
pub struct PresenceTracker {
    statuses: HashMap<UserId, bool>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent; unknown ids get an entry.
    pub fn set_online(&mut self, user_id: &UserId, online: bool) {
        self.statuses.insert(user_id.clone(), online);
    }

    /// Unknown ids are offline.
    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.statuses.get(user_id).copied().unwrap_or(false)
    }
}
