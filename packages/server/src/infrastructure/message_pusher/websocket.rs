//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - セッションごとの `UnboundedSender` を管理
//! - ルーム購読（どのセッションがどのルームのブロードキャストを受け取るか）を管理
//! - 通知を JSON にエンコードし、配信範囲に従って送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        DeliveryScope, MessagePushError, MessagePusher, Notification, PusherChannel, RoomName,
        SessionId,
    },
    infrastructure::dto::websocket::ServerEvent,
};

#[derive(Default)]
struct Subscribers {
    /// Key: session id, Value: channel to the connection
    sessions: HashMap<SessionId, PusherChannel>,
    /// Key: room, Value: subscribed sessions
    rooms: HashMap<RoomName, HashSet<SessionId>>,
}

impl Subscribers {
    fn send(&self, session: &SessionId, content: &str) -> Result<(), MessagePushError> {
        let sender = self
            .sessions
            .get(session)
            .ok_or_else(|| MessagePushError::SessionNotFound(session.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    /// Best-effort fan-out: individual failures are logged and skipped.
    fn broadcast<'a>(&self, targets: impl Iterator<Item = &'a SessionId>, content: &str) {
        for target in targets {
            match self.send(target, content) {
                Ok(()) => tracing::debug!("Broadcasted message to session '{}'", target),
                Err(e) => tracing::warn!("Failed to push message to session '{}': {}", target, e),
            }
        }
    }
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_session(session_id.clone(), tx).await;
/// pusher.subscribe(&session_id, &room).await;
/// pusher.deliver(&DeliveryScope::Room(room), &notification).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    subscribers: Mutex<Subscribers>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(notification))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session: SessionId, sender: PusherChannel) {
        let mut subscribers = self.subscribers.lock().await;
        tracing::debug!("Session '{}' registered to MessagePusher", session);
        subscribers.sessions.insert(session, sender);
    }

    async fn unregister_session(&self, session: &SessionId) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.sessions.remove(session);
        subscribers.rooms.retain(|_, members| {
            members.remove(session);
            !members.is_empty()
        });
        tracing::debug!("Session '{}' unregistered from MessagePusher", session);
    }

    async fn subscribe(&self, session: &SessionId, room: &RoomName) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(session.clone());
        tracing::debug!("Session '{}' subscribed to room '{}'", session, room);
    }

    async fn unsubscribe(&self, session: &SessionId, room: &RoomName) {
        let mut subscribers = self.subscribers.lock().await;
        if let Some(members) = subscribers.rooms.get_mut(room) {
            members.remove(session);
            if members.is_empty() {
                subscribers.rooms.remove(room);
            }
        }
        tracing::debug!("Session '{}' unsubscribed from room '{}'", session, room);
    }

    async fn deliver(
        &self,
        scope: &DeliveryScope,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let subscribers = self.subscribers.lock().await;

        match scope {
            DeliveryScope::Session(session) => {
                subscribers.send(session, &content)?;
                tracing::debug!("Pushed message to session '{}'", session);
            }
            DeliveryScope::Room(room) => {
                if let Some(members) = subscribers.rooms.get(room) {
                    subscribers.broadcast(members.iter(), &content);
                }
            }
            DeliveryScope::RoomExcept { room, except } => {
                if let Some(members) = subscribers.rooms.get(room) {
                    subscribers.broadcast(members.iter().filter(|s| *s != except), &content);
                }
            }
            DeliveryScope::Everyone => {
                subscribers.broadcast(subscribers.sessions.keys(), &content);
            }
        }

        Ok(())
    }

    async fn session_count(&self) -> usize {
        self.subscribers.lock().await.sessions.len()
    }
}
