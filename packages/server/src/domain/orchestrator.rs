//! Session Orchestrator
//!
//! セッションイベントを受けて User Registry / Presence Tracker / Room History を
//! 更新し、配信範囲付きの Outbound を返す純粋な状態機械。
//!
//! ## セッションの状態
//!
//! ```text
//! Unbound --join--> Joined --join (same identity)--> Joined (reconnection)
//!                          --leaveRoom--> Left
//!                          --disconnect--> Disconnected
//! ```
//!
//! セッションの状態は Registry 上の `session_id` の紐付けそのもので表現される。
//! 3 つのストアへの書き込みはこのモジュールだけが行う。
//! 呼び出し側は 1 つのロックの内側で `handle` を呼ぶこと。

use super::{
    entity::{Message, PrivateMessage, User},
    error::JoinError,
    event::{Identity, SessionEvent},
    history::{DEFAULT_HISTORY_LIMIT, RoomHistory},
    notification::{DeliveryScope, Notification, Outbound},
    presence::PresenceTracker,
    registry::UserRegistry,
    value_object::{RoomName, SessionId, Timestamp, UserId, UserName},
};

/// Default maximum number of users per room.
pub const DEFAULT_ROOM_CAPACITY: usize = 100;

/// Occupancy figures for one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: RoomName,
    pub users: usize,
    pub online: usize,
    pub history: usize,
}

#[derive(Debug)]
pub struct SessionOrchestrator {
    registry: UserRegistry,
    presence: PresenceTracker,
    history: RoomHistory,
    room_capacity: usize,
}

impl Default for SessionOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_CAPACITY, DEFAULT_HISTORY_LIMIT)
    }
}

impl SessionOrchestrator {
    pub fn new(room_capacity: usize, history_limit: usize) -> Self {
        Self {
            registry: UserRegistry::new(),
            presence: PresenceTracker::new(),
            history: RoomHistory::with_limit(history_limit),
            room_capacity: room_capacity.max(1),
        }
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    pub fn history(&self) -> &RoomHistory {
        &self.history
    }

    pub fn room_capacity(&self) -> usize {
        self.room_capacity
    }

    /// Apply one inbound event and return what the transport must do, in order.
    ///
    /// Lookups that miss produce an empty list and leave every store untouched.
    pub fn handle(
        &mut self,
        session: &SessionId,
        event: SessionEvent,
        now: Timestamp,
    ) -> Vec<Outbound> {
        match event {
            SessionEvent::Join { name, room } => self.join(session, name, room, now),
            SessionEvent::SendMessage {
                sender,
                text,
                attachment,
            } => self.send_message(&sender, text, attachment, now),
            SessionEvent::PrivateMessage { to, text } => {
                self.private_message(session, &to, text, now)
            }
            SessionEvent::Typing { room, is_typing } => self.typing(session, &room, is_typing),
            SessionEvent::LeaveRoom { sender } => self.leave_room(&sender.name, &sender.room, now),
            SessionEvent::SetOnline { user_id } => self.set_online(&user_id),
            SessionEvent::Disconnect => self.disconnect(session, now),
        }
    }

    fn join(
        &mut self,
        session: &SessionId,
        name: UserName,
        room: RoomName,
        now: Timestamp,
    ) -> Vec<Outbound> {
        let reconnecting = self.registry.find_user(&name, &room).is_some();
        // Re-joining its own room under a new name frees the session's current slot.
        let released = self
            .registry
            .find_user_by_session(session)
            .is_some_and(|current| current.room == room);
        let occupancy = self
            .registry
            .room_size(&room)
            .saturating_sub(usize::from(released));
        if !reconnecting && occupancy >= self.room_capacity {
            let error = JoinError::RoomCapacityExceeded {
                room: room.to_string(),
                capacity: self.room_capacity,
            };
            tracing::warn!("Rejected join of '{}' to '{}': {}", name, room, error);
            return vec![Outbound::to_session(
                session,
                Notification::Error {
                    message: error.to_string(),
                },
            )];
        }

        let mut outbound = Vec::new();

        // A session bound to another identity switches rooms by leaving first.
        if let Some(current) = self.registry.find_user_by_session(session).cloned()
            && !current.is_identified_by(&name, &room)
        {
            outbound.extend(self.leave_room(&current.name, &current.room, now));
        }

        outbound.push(Outbound::Subscribe {
            session: session.clone(),
            room: room.clone(),
        });

        let (user, existed) = self.registry.add_user(name, room, session.clone());
        self.presence.set_online(&user.id, true);

        let (welcome, announcement) = if existed {
            tracing::info!("'{}' rejoined '{}'", user.name, user.room);
            (
                format!("{}, welcome back to {}", user.name, user.room),
                format!("{} has rejoined the chat", user.name),
            )
        } else {
            tracing::info!("'{}' joined '{}'", user.name, user.room);
            outbound.push(Outbound::to_session(
                session,
                Notification::History(self.history.get(&user.room)),
            ));
            (
                format!("Welcome {} to {}", user.name, user.room),
                format!("{} has joined the chat", user.name),
            )
        };

        outbound.push(Outbound::to_session(
            session,
            Notification::Message(Message::system(user.room.clone(), welcome, now)),
        ));
        outbound.push(Outbound::to_room_except(
            &user.room,
            session,
            Notification::Message(Message::system(user.room.clone(), announcement, now)),
        ));
        outbound.push(self.room_data(&user.room));
        outbound
    }

    fn send_message(
        &mut self,
        sender: &Identity,
        text: String,
        attachment: Option<super::entity::Attachment>,
        now: Timestamp,
    ) -> Vec<Outbound> {
        let Some(user) = self.registry.find_user(&sender.name, &sender.room) else {
            tracing::debug!(
                "Dropping message from unknown sender '{}' in '{}'",
                sender.name,
                sender.room
            );
            return Vec::new();
        };

        let message = Message::from_user(user, text, attachment, now);
        let room = user.room.clone();
        self.history.append(&room, message.clone());

        vec![Outbound::to_room(&room, Notification::Message(message))]
    }

    fn private_message(
        &self,
        session: &SessionId,
        to: &UserId,
        text: String,
        now: Timestamp,
    ) -> Vec<Outbound> {
        let (Some(from), Some(recipient)) = (
            self.registry.find_user_by_session(session),
            self.registry.find_user_by_id(to),
        ) else {
            tracing::debug!("Dropping private message from '{}' to '{}'", session, to);
            return Vec::new();
        };

        let message = PrivateMessage {
            from: from.as_sender(),
            to: recipient.as_sender(),
            text,
            timestamp: now,
        };

        vec![
            Outbound::to_session(
                &recipient.session_id,
                Notification::PrivateMessage(message.clone()),
            ),
            Outbound::to_session(session, Notification::PrivateMessage(message)),
        ]
    }

    fn typing(&self, session: &SessionId, room: &RoomName, is_typing: bool) -> Vec<Outbound> {
        let Some(user) = self.registry.find_user_by_session(session) else {
            return Vec::new();
        };
        if &user.room != room {
            tracing::debug!(
                "Dropping typing indicator of '{}' for foreign room '{}'",
                user.name,
                room
            );
            return Vec::new();
        }

        vec![Outbound::to_room_except(
            room,
            session,
            Notification::Typing {
                user_id: user.id.clone(),
                name: user.name.clone(),
                is_typing,
            },
        )]
    }

    fn leave_room(&mut self, name: &UserName, room: &RoomName, now: Timestamp) -> Vec<Outbound> {
        let Some(user) = self.registry.remove_user(name, room) else {
            return Vec::new();
        };
        self.presence.set_online(&user.id, false);
        tracing::info!("'{}' left '{}'", user.name, user.room);

        vec![
            Outbound::to_room(
                &user.room,
                Notification::Message(Message::system(
                    user.room.clone(),
                    format!("{} has left the chat", user.name),
                    now,
                )),
            ),
            self.room_data(&user.room),
            Outbound::Unsubscribe {
                session: user.session_id,
                room: user.room,
            },
        ]
    }

    fn disconnect(&mut self, session: &SessionId, now: Timestamp) -> Vec<Outbound> {
        let Some(user) = self.registry.find_user_by_session(session).cloned() else {
            return Vec::new();
        };
        let User { id, name, room, .. } = user;

        self.presence.set_online(&id, false);
        let mut outbound = vec![
            Outbound::to_room(
                &room,
                Notification::UserStatusChanged {
                    user_id: id,
                    is_online: false,
                },
            ),
            Outbound::to_room(
                &room,
                Notification::Message(Message::system(
                    room.clone(),
                    format!("{name} has disconnected"),
                    now,
                )),
            ),
        ];

        self.registry.remove_user(&name, &room);
        tracing::info!("'{}' disconnected from '{}'", name, room);
        outbound.push(self.room_data(&room));
        outbound
    }

    fn set_online(&mut self, user_id: &UserId) -> Vec<Outbound> {
        self.presence.set_online(user_id, true);
        vec![Outbound::deliver(
            DeliveryScope::Everyone,
            Notification::UserStatusChanged {
                user_id: user_id.clone(),
                is_online: true,
            },
        )]
    }

    fn room_data(&self, room: &RoomName) -> Outbound {
        Outbound::to_room(
            room,
            Notification::RoomData {
                room: room.clone(),
                users: self.registry.list_room_users(room, &self.presence),
            },
        )
    }

    /// Occupancy of every room that currently has users, sorted by name.
    pub fn room_summaries(&self) -> Vec<RoomSummary> {
        self.registry
            .room_names()
            .into_iter()
            .map(|room| {
                let members = self.registry.list_room_users(&room, &self.presence);
                RoomSummary {
                    users: members.len(),
                    online: members.iter().filter(|m| m.is_online).count(),
                    history: self.history.len(&room),
                    room,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{Attachment, MessageKind};
    use hiroba_shared::time::{Clock, FixedClock};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - join / sendMessage / privateMessage / typing / leaveRoom / disconnect / setOnline
    //   の各遷移で返される Outbound の内容・順序・配信範囲
    // - 3 つのストア (Registry, Presence, History) の整合性
    //
    // 【どのようなシナリオをテストするか】
    // 1. 新規参加と再接続 (welcome / welcome back)
    // 2. ルーム容量超過
    // 3. 未参加セッションの切断・未知の送信者 (何もしない)
    // 4. 他ルームのユーザーが削除されないこと
    // ========================================

    fn now() -> Timestamp {
        Timestamp::new(FixedClock::from_millis(1_700_000_000_000).now())
    }

    fn session(value: &str) -> SessionId {
        SessionId::new(value)
    }

    fn room(value: &str) -> RoomName {
        RoomName::new(value).unwrap()
    }

    fn identity(name: &str, room_name: &str) -> Identity {
        Identity::new(UserName::new(name).unwrap(), room(room_name))
    }

    fn join(name: &str, room_name: &str) -> SessionEvent {
        SessionEvent::Join {
            name: UserName::new(name).unwrap(),
            room: room(room_name),
        }
    }

    fn system_text(outbound: &Outbound) -> Option<(&DeliveryScope, &str)> {
        match outbound {
            Outbound::Deliver {
                scope,
                notification: Notification::Message(message),
            } if message.kind == MessageKind::System => Some((scope, message.text.as_str())),
            _ => None,
        }
    }

    fn room_data_users(outbound: &Outbound) -> Option<Vec<(String, bool)>> {
        match outbound {
            Outbound::Deliver {
                notification: Notification::RoomData { users, .. },
                ..
            } => Some(
                users
                    .iter()
                    .map(|u| (u.name.to_string(), u.is_online))
                    .collect(),
            ),
            _ => None,
        }
    }

    #[test]
    fn test_fresh_join_then_reconnection() {
        // テスト項目: 新規参加では履歴と welcome、再接続では welcome back が配信される
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        let s1 = session("s1");
        let s2 = session("s2");
        let lobby = room("lobby");

        // when (操作): 新規参加
        let fresh = orchestrator.handle(&s1, join("Alice", "lobby"), now());

        // then (期待する結果):
        assert_eq!(fresh.len(), 5);
        assert_eq!(
            fresh[0],
            Outbound::Subscribe {
                session: s1.clone(),
                room: lobby.clone()
            }
        );
        assert_eq!(
            fresh[1],
            Outbound::to_session(&s1, Notification::History(Vec::new()))
        );
        assert_eq!(
            system_text(&fresh[2]),
            Some((
                &DeliveryScope::Session(s1.clone()),
                "Welcome Alice to lobby"
            ))
        );
        assert_eq!(
            system_text(&fresh[3]),
            Some((
                &DeliveryScope::RoomExcept {
                    room: lobby.clone(),
                    except: s1.clone()
                },
                "Alice has joined the chat"
            ))
        );
        assert_eq!(
            room_data_users(&fresh[4]),
            Some(vec![("Alice".to_string(), true)])
        );

        // when (操作): 別セッションから同じ identity で再参加
        let again = orchestrator.handle(&s2, join("Alice", "lobby"), now());

        // then (期待する結果): 履歴は送られず welcome back になる
        assert!(
            !again
                .iter()
                .any(|o| matches!(o, Outbound::Deliver { notification: Notification::History(_), .. }))
        );
        let texts: Vec<&str> = again.iter().filter_map(system_text).map(|(_, t)| t).collect();
        assert_eq!(
            texts,
            vec!["Alice, welcome back to lobby", "Alice has rejoined the chat"]
        );
        assert_eq!(
            room_data_users(again.last().unwrap()),
            Some(vec![("Alice".to_string(), true)])
        );
        let alice = orchestrator
            .registry()
            .find_user(&UserName::new("Alice").unwrap(), &lobby)
            .unwrap();
        assert_eq!(alice.session_id, s2);
        assert_eq!(orchestrator.registry().room_size(&lobby), 1);
    }

    #[test]
    fn test_join_replays_history_to_new_user() {
        // テスト項目: 新規参加者には既存の履歴が本人にだけ配信される
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("s1"), join("bob", "lobby"), now());
        orchestrator.handle(
            &session("s1"),
            SessionEvent::SendMessage {
                sender: identity("bob", "lobby"),
                text: "hi".to_string(),
                attachment: None,
            },
            now(),
        );

        // when (操作):
        let outbound = orchestrator.handle(&session("s2"), join("carol", "lobby"), now());

        // then (期待する結果):
        match &outbound[1] {
            Outbound::Deliver {
                scope: DeliveryScope::Session(target),
                notification: Notification::History(messages),
            } => {
                assert_eq!(target, &session("s2"));
                assert_eq!(messages.len(), 1);
                assert_eq!(messages[0].text, "hi");
            }
            other => panic!("unexpected outbound: {other:?}"),
        }
    }

    #[test]
    fn test_join_rejected_when_room_is_full() {
        // テスト項目: 容量に達したルームへの参加は要求者にのみエラーが返り、状態は変わらない
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::new(2, 100);
        orchestrator.handle(&session("s1"), join("a", "lobby"), now());
        orchestrator.handle(&session("s2"), join("b", "lobby"), now());

        // when (操作):
        let outbound = orchestrator.handle(&session("s3"), join("c", "lobby"), now());

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![Outbound::to_session(
                &session("s3"),
                Notification::Error {
                    message: "Room is full (max 2 users)".to_string()
                }
            )]
        );
        assert_eq!(orchestrator.registry().room_size(&room("lobby")), 2);
        assert!(orchestrator.registry().find_user_by_session(&session("s3")).is_none());
    }

    #[test]
    fn test_reconnection_into_full_room_is_allowed() {
        // テスト項目: 満員のルームでも既存 identity の再接続は容量に数えない
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::new(1, 100);
        orchestrator.handle(&session("s1"), join("a", "lobby"), now());

        // when (操作):
        let outbound = orchestrator.handle(&session("s2"), join("a", "lobby"), now());

        // then (期待する結果):
        assert!(
            !outbound
                .iter()
                .any(|o| matches!(o, Outbound::Deliver { notification: Notification::Error { .. }, .. }))
        );
        assert_eq!(orchestrator.registry().room_size(&room("lobby")), 1);
    }

    #[test]
    fn test_rename_within_full_room_is_allowed() {
        // テスト項目: 満員のルームでも同じセッションの別名での再参加は自分の枠を使える
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::new(1, 100);
        orchestrator.handle(&session("s1"), join("alice", "lobby"), now());

        // when (操作):
        let outbound = orchestrator.handle(&session("s1"), join("alicia", "lobby"), now());

        // then (期待する結果):
        assert_eq!(
            system_text(&outbound[0]).map(|(_, t)| t),
            Some("alice has left the chat")
        );
        assert!(
            !outbound
                .iter()
                .any(|o| matches!(o, Outbound::Deliver { notification: Notification::Error { .. }, .. }))
        );
        let members = orchestrator
            .registry()
            .list_room_users(&room("lobby"), orchestrator.presence());
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name.as_str(), "alicia");
    }

    #[test]
    fn test_room_never_exceeds_capacity() {
        // テスト項目: どのような参加の列でもルームの人数は容量以下
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();

        // when (操作):
        for n in 0..150 {
            orchestrator.handle(&session(&format!("s{n}")), join(&format!("u{n}"), "lobby"), now());
        }

        // then (期待する結果):
        let members = orchestrator
            .registry()
            .list_room_users(&room("lobby"), orchestrator.presence());
        assert_eq!(members.len(), DEFAULT_ROOM_CAPACITY);
    }

    #[test]
    fn test_send_message_appends_and_echoes_to_whole_room() {
        // テスト項目: メッセージは履歴に追加され、送信者を含むルーム全体に配信される
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("s1"), join("alice", "lobby"), now());
        let attachment = Attachment {
            url: "/uploads/1-x.png".to_string(),
            mime_category: "image".to_string(),
        };

        // when (操作):
        let outbound = orchestrator.handle(
            &session("s1"),
            SessionEvent::SendMessage {
                sender: identity(" alice ", "lobby"),
                text: "look".to_string(),
                attachment: Some(attachment.clone()),
            },
            now(),
        );

        // then (期待する結果):
        assert_eq!(outbound.len(), 1);
        match &outbound[0] {
            Outbound::Deliver {
                scope: DeliveryScope::Room(target),
                notification: Notification::Message(message),
            } => {
                assert_eq!(target, &room("lobby"));
                assert_eq!(message.kind, MessageKind::Image);
                assert_eq!(message.attachment.as_ref(), Some(&attachment));
                assert_eq!(message.user.name.as_str(), "alice");
            }
            other => panic!("unexpected outbound: {other:?}"),
        }
        assert_eq!(orchestrator.history().len(&room("lobby")), 1);
    }

    #[test]
    fn test_send_message_from_unknown_sender_is_dropped() {
        // テスト項目: 未知の送信者からのメッセージは何もせず破棄される
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();

        // when (操作):
        let outbound = orchestrator.handle(
            &session("s1"),
            SessionEvent::SendMessage {
                sender: identity("ghost", "lobby"),
                text: "boo".to_string(),
                attachment: None,
            },
            now(),
        );

        // then (期待する結果):
        assert!(outbound.is_empty());
        assert_eq!(orchestrator.history().len(&room("lobby")), 0);
    }

    #[test]
    fn test_private_message_delivers_twice_without_history() {
        // テスト項目: 個別メッセージは受信者と送信者の 2 セッションにのみ届き、履歴に残らない
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("sa"), join("A", "lobby"), now());
        orchestrator.handle(&session("sb"), join("B", "dev"), now());
        let b_id = orchestrator
            .registry()
            .find_user_by_session(&session("sb"))
            .unwrap()
            .id
            .clone();

        // when (操作):
        let outbound = orchestrator.handle(
            &session("sa"),
            SessionEvent::PrivateMessage {
                to: b_id,
                text: "psst".to_string(),
            },
            now(),
        );

        // then (期待する結果):
        let scopes: Vec<&DeliveryScope> = outbound
            .iter()
            .map(|o| match o {
                Outbound::Deliver { scope, .. } => scope,
                other => panic!("unexpected outbound: {other:?}"),
            })
            .collect();
        assert_eq!(
            scopes,
            vec![
                &DeliveryScope::Session(session("sb")),
                &DeliveryScope::Session(session("sa"))
            ]
        );
        assert_eq!(orchestrator.history().len(&room("lobby")), 0);
        assert_eq!(orchestrator.history().len(&room("dev")), 0);
    }

    #[test]
    fn test_private_message_to_unknown_user_is_dropped() {
        // テスト項目: 宛先が存在しない個別メッセージは破棄される
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("sa"), join("A", "lobby"), now());

        // when (操作):
        let outbound = orchestrator.handle(
            &session("sa"),
            SessionEvent::PrivateMessage {
                to: UserId::new("missing".to_string()).unwrap(),
                text: "hello?".to_string(),
            },
            now(),
        );

        // then (期待する結果):
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_typing_broadcasts_to_others_in_own_room() {
        // テスト項目: 入力中表示は自分のルームの他のメンバーにだけ配信される
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("s1"), join("alice", "lobby"), now());

        // when (操作):
        let own_room = orchestrator.handle(
            &session("s1"),
            SessionEvent::Typing {
                room: room("lobby"),
                is_typing: true,
            },
            now(),
        );
        let foreign_room = orchestrator.handle(
            &session("s1"),
            SessionEvent::Typing {
                room: room("dev"),
                is_typing: true,
            },
            now(),
        );

        // then (期待する結果):
        assert_eq!(own_room.len(), 1);
        assert!(matches!(
            &own_room[0],
            Outbound::Deliver {
                scope: DeliveryScope::RoomExcept { .. },
                notification: Notification::Typing { is_typing: true, .. },
            }
        ));
        assert!(foreign_room.is_empty());
    }

    #[test]
    fn test_leave_room_removes_only_that_user() {
        // テスト項目: 退出は該当ユーザーのみを削除し、他室のユーザーは残る
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("sa"), join("A", "R1"), now());
        orchestrator.handle(&session("sb"), join("B", "R1"), now());
        orchestrator.handle(&session("sc"), join("C", "R2"), now());
        let a_id = orchestrator
            .registry()
            .find_user_by_session(&session("sa"))
            .unwrap()
            .id
            .clone();

        // when (操作):
        let outbound = orchestrator.handle(
            &session("sa"),
            SessionEvent::LeaveRoom {
                sender: identity("A", "R1"),
            },
            now(),
        );

        // then (期待する結果):
        assert_eq!(
            system_text(&outbound[0]).map(|(_, t)| t),
            Some("A has left the chat")
        );
        assert_eq!(
            room_data_users(&outbound[1]),
            Some(vec![("B".to_string(), true)])
        );
        assert_eq!(
            outbound[2],
            Outbound::Unsubscribe {
                session: session("sa"),
                room: room("R1")
            }
        );
        assert_eq!(orchestrator.registry().len(), 2);
        assert!(orchestrator.registry().find_user_by_session(&session("sc")).is_some());
        assert!(!orchestrator.presence().is_online(&a_id));
    }

    #[test]
    fn test_leave_room_unknown_identity_is_noop() {
        // テスト項目: 存在しない identity の退出は何もしない
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();

        // when (操作):
        let outbound = orchestrator.handle(
            &session("s1"),
            SessionEvent::LeaveRoom {
                sender: identity("nobody", "lobby"),
            },
            now(),
        );

        // then (期待する結果):
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_disconnect_announces_and_removes_user() {
        // テスト項目: 切断はオフライン通知・切断メッセージ・削除・ルーム状態更新の順に行われる
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("s1"), join("alice", "lobby"), now());
        orchestrator.handle(&session("s2"), join("bob", "lobby"), now());
        let alice_id = orchestrator
            .registry()
            .find_user_by_session(&session("s1"))
            .unwrap()
            .id
            .clone();

        // when (操作):
        let outbound = orchestrator.handle(&session("s1"), SessionEvent::Disconnect, now());

        // then (期待する結果):
        assert_eq!(outbound.len(), 3);
        assert_eq!(
            outbound[0],
            Outbound::to_room(
                &room("lobby"),
                Notification::UserStatusChanged {
                    user_id: alice_id.clone(),
                    is_online: false
                }
            )
        );
        assert_eq!(
            system_text(&outbound[1]).map(|(_, t)| t),
            Some("alice has disconnected")
        );
        assert_eq!(
            room_data_users(&outbound[2]),
            Some(vec![("bob".to_string(), true)])
        );
        assert!(!orchestrator.presence().is_online(&alice_id));
        assert_eq!(orchestrator.registry().room_size(&room("lobby")), 1);
    }

    #[test]
    fn test_disconnect_of_never_joined_session_is_noop() {
        // テスト項目: 一度も参加していないセッションの切断は何も変更しない
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("s1"), join("alice", "lobby"), now());

        // when (操作):
        let outbound = orchestrator.handle(&session("stranger"), SessionEvent::Disconnect, now());

        // then (期待する結果):
        assert!(outbound.is_empty());
        assert_eq!(orchestrator.registry().len(), 1);
    }

    #[test]
    fn test_stale_session_disconnect_after_reconnection_is_noop() {
        // テスト項目: 再接続後に古いセッションが切断されてもユーザーは残る
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("old"), join("alice", "lobby"), now());
        orchestrator.handle(&session("new"), join("alice", "lobby"), now());

        // when (操作):
        let outbound = orchestrator.handle(&session("old"), SessionEvent::Disconnect, now());

        // then (期待する結果):
        assert!(outbound.is_empty());
        assert_eq!(orchestrator.registry().room_size(&room("lobby")), 1);
    }

    #[test]
    fn test_join_from_bound_session_switches_rooms() {
        // テスト項目: 別ルームへの参加は直前の identity の退出を経由する
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("s1"), join("alice", "lobby"), now());

        // when (操作):
        let outbound = orchestrator.handle(&session("s1"), join("alice", "dev"), now());

        // then (期待する結果):
        assert_eq!(
            system_text(&outbound[0]).map(|(_, t)| t),
            Some("alice has left the chat")
        );
        assert!(outbound.contains(&Outbound::Unsubscribe {
            session: session("s1"),
            room: room("lobby")
        }));
        assert_eq!(orchestrator.registry().room_size(&room("lobby")), 0);
        assert_eq!(orchestrator.registry().room_size(&room("dev")), 1);
    }

    #[test]
    fn test_set_online_broadcasts_to_everyone() {
        // テスト項目: setOnline は全セッションへ状態変更を通知する
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        let user_id = UserId::new("someone".to_string()).unwrap();

        // when (操作):
        let outbound = orchestrator.handle(
            &session("s1"),
            SessionEvent::SetOnline {
                user_id: user_id.clone(),
            },
            now(),
        );

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![Outbound::deliver(
                DeliveryScope::Everyone,
                Notification::UserStatusChanged {
                    user_id: user_id.clone(),
                    is_online: true
                }
            )]
        );
        assert!(orchestrator.presence().is_online(&user_id));
    }

    #[test]
    fn test_room_summaries() {
        // テスト項目: ルームごとの人数・オンライン数・履歴件数が集計される
        // given (前提条件):
        let mut orchestrator = SessionOrchestrator::default();
        orchestrator.handle(&session("s1"), join("alice", "lobby"), now());
        orchestrator.handle(&session("s2"), join("bob", "dev"), now());
        orchestrator.handle(
            &session("s1"),
            SessionEvent::SendMessage {
                sender: identity("alice", "lobby"),
                text: "hi".to_string(),
                attachment: None,
            },
            now(),
        );

        // when (操作):
        let summaries = orchestrator.room_summaries();

        // then (期待する結果):
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].room, room("dev"));
        assert_eq!(summaries[1].room, room("lobby"));
        assert_eq!(summaries[1].users, 1);
        assert_eq!(summaries[1].online, 1);
        assert_eq!(summaries[1].history, 1);
    }
}
