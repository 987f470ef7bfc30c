//! MessagePusher trait 定義
//!
//! Orchestrator が返す Outbound を実際にクライアントへ届ける通信層のインターフェース。
//! セッションの送信チャンネルとルーム購読はこの trait の実装が管理する。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    notification::{DeliveryScope, Notification},
    value_object::{RoomName, SessionId},
};

/// Channel feeding one WebSocket connection with encoded frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_session(&self, session: SessionId, sender: PusherChannel);

    /// 接続と全てのルーム購読を解除
    async fn unregister_session(&self, session: &SessionId);

    /// セッションをルームのブロードキャスト対象に加える
    async fn subscribe(&self, session: &SessionId, room: &RoomName);

    /// セッションをルームのブロードキャスト対象から外す
    async fn unsubscribe(&self, session: &SessionId, room: &RoomName);

    /// 配信範囲に従って通知を送る
    ///
    /// 単一セッション宛ての送信失敗はエラーを返す。
    /// ブロードキャストでは一部の送信失敗を許容する。
    async fn deliver(
        &self,
        scope: &DeliveryScope,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 現在登録されている接続数
    async fn session_count(&self) -> usize;
}
