//! Room History Store
//!
//! ルームごとの上限付きメッセージ履歴。上限を超えると古いものから破棄する (FIFO)。

use std::collections::{HashMap, VecDeque};

use super::{entity::Message, value_object::RoomName};

/// Default number of messages retained per room.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug)]
pub struct RoomHistory {
    limit: usize,
    rooms: HashMap<RoomName, VecDeque<Message>>,
}

impl Default for RoomHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl RoomHistory {
    /// `limit` is clamped to at least one message.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            rooms: HashMap::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn append(&mut self, room: &RoomName, message: Message) {
        let limit = self.limit;
        let messages = self
            .rooms
            .entry(room.clone())
            .or_insert_with(|| VecDeque::with_capacity(limit));
        messages.push_back(message);
        while messages.len() > limit {
            messages.pop_front();
        }
    }

    /// Retained window for `room`, oldest first. Empty for unknown rooms.
    pub fn get(&self, room: &RoomName) -> Vec<Message> {
        self.rooms
            .get(room)
            .map(|messages| messages.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, room: &RoomName) -> usize {
        self.rooms.get(room).map_or(0, VecDeque::len)
    }
}
