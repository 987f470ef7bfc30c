//! User Registry
//!
//! 既知のユーザーと、(名前, ルーム) またはセッション ID による同一性解決を管理する。
//! 同一ルーム内で同じ正規化済み名前を持つユーザーは常に高々 1 人。

use std::collections::HashMap;

use super::{
    entity::{RoomMember, User},
    presence::PresenceTracker,
    value_object::{RoomName, SessionId, UserId, UserIdFactory, UserName},
};

/// Registered users, grouped by room in join order.
#[derive(Debug, Default)]
pub struct UserRegistry {
    rooms: HashMap<RoomName, Vec<User>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `(name, room)` on `session_id`.
    ///
    /// Returns the user and whether it already existed. An existing identity
    /// keeps its id and only has its session replaced (reconnection).
    pub fn add_user(
        &mut self,
        name: UserName,
        room: RoomName,
        session_id: SessionId,
    ) -> (User, bool) {
        let users = self.rooms.entry(room.clone()).or_default();

        if let Some(existing) = users.iter_mut().find(|u| u.is_identified_by(&name, &room)) {
            existing.session_id = session_id;
            return (existing.clone(), true);
        }

        let user = User::new(UserIdFactory::generate(), name, room, session_id);
        users.push(user.clone());
        (user, false)
    }

    pub fn find_user(&self, name: &UserName, room: &RoomName) -> Option<&User> {
        self.rooms
            .get(room)?
            .iter()
            .find(|u| u.is_identified_by(name, room))
    }

    pub fn find_user_by_session(&self, session_id: &SessionId) -> Option<&User> {
        self.users().find(|u| &u.session_id == session_id)
    }

    pub fn find_user_by_id(&self, id: &UserId) -> Option<&User> {
        self.users().find(|u| &u.id == id)
    }

    /// Remove exactly the user matching `(name, room)`.
    ///
    /// Every other user, in this room or any other, is left untouched.
    pub fn remove_user(&mut self, name: &UserName, room: &RoomName) -> Option<User> {
        let users = self.rooms.get_mut(room)?;
        let index = users.iter().position(|u| u.is_identified_by(name, room))?;
        let removed = users.remove(index);
        if users.is_empty() {
            self.rooms.remove(room);
        }
        Some(removed)
    }

    /// Snapshot of a room in join order, with presence resolved from `presence`.
    pub fn list_room_users(&self, room: &RoomName, presence: &PresenceTracker) -> Vec<RoomMember> {
        self.rooms
            .get(room)
            .map(|users| {
                users
                    .iter()
                    .map(|u| RoomMember {
                        id: u.id.clone(),
                        name: u.name.clone(),
                        is_online: presence.is_online(&u.id),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of users registered in `room`.
    pub fn room_size(&self, room: &RoomName) -> usize {
        self.rooms.get(room).map_or(0, Vec::len)
    }

    /// Rooms with at least one registered user, sorted by name.
    pub fn room_names(&self) -> Vec<RoomName> {
        let mut names: Vec<RoomName> = self.rooms.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn users(&self) -> impl Iterator<Item = &User> {
        self.rooms.values().flatten()
    }
}
