//! WebSocket connection handlers.
//!
//! 1 接続につき 2 つのタスクを動かす:
//! - 受信タスク: クライアントのフレームを `SessionEvent` に変換して処理する
//! - 送信タスク (`pusher_loop`): MessagePusher から届いたフレームをソケットへ書き込む
//!
//! どちらかが終了したらもう一方も止め、disconnect を処理する。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{PusherChannel, SessionEvent, SessionId},
    infrastructure::dto::websocket::{ClientEvent, ErrorDto, ServerEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the MessagePusher
/// * `sender` - WebSocket sink to send messages to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = state.connect_session_usecase.execute(tx.clone()).await;

    let (sender, receiver) = socket.split();
    let (stop_tx, stop_rx) = oneshot::channel();

    let recv_state = state.clone();
    let recv_session = session.clone();
    let mut recv_task = tokio::spawn(receive_loop(receiver, stop_rx, move |text| {
        let state = recv_state.clone();
        let session = recv_session.clone();
        let tx = tx.clone();
        async move { handle_frame(&state, &session, &tx, &text).await }
    }));

    let mut send_task = pusher_loop(rx, sender);

    // A finished receive loop aborts the pusher. A finished pusher only asks the
    // receive loop to stop, so a frame being dispatched is delivered in full.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            let _ = stop_tx.send(());
            if let Err(e) = recv_task.await {
                tracing::warn!("Receive task of '{}' ended abnormally: {}", session, e);
            }
        }
    };

    state.disconnect_session_usecase.execute(&session).await;
}

/// Feeds text frames to `on_text` until the stream ends, a close frame
/// arrives or `stop` fires. `stop` is only observed between frames.
async fn receive_loop<S, F, Fut>(mut receiver: S, mut stop: oneshot::Receiver<()>, mut on_text: F)
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let frame = tokio::select! {
            _ = &mut stop => break,
            frame = receiver.next() => frame,
        };
        let Some(Ok(msg)) = frame else {
            break;
        };
        match msg {
            Message::Text(text) => on_text(text.as_str().to_string()).await,
            Message::Close(_) => {
                tracing::debug!("Client requested close");
                break;
            }
            _ => {}
        }
    }
}

/// Parse one text frame and hand it to the dispatcher.
///
/// Unparseable frames are dropped. A `join` with a blank name or room is
/// answered with an `error` event; other invalid events are dropped.
async fn handle_frame(state: &AppState, session: &SessionId, tx: &PusherChannel, text: &str) {
    let client_event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping unparseable frame from '{}': {}", session, e);
            return;
        }
    };

    let is_join = matches!(client_event, ClientEvent::Join(_));
    match SessionEvent::try_from(client_event) {
        Ok(event) => {
            state.dispatch_event_usecase.execute(session, event).await;
        }
        Err(e) if is_join => {
            tracing::warn!("Rejecting join from '{}': {}", session, e);
            let reply = ServerEvent::Error(ErrorDto {
                message: e.to_string(),
            });
            match serde_json::to_string(&reply) {
                Ok(json) => {
                    if tx.send(json).is_err() {
                        tracing::warn!("Session '{}' closed before the error was sent", session);
                    }
                }
                Err(e) => tracing::error!("Failed to serialize error event: {}", e),
            }
        }
        Err(e) => {
            tracing::warn!("Dropping invalid event from '{}': {}", session, e);
        }
    }
}
