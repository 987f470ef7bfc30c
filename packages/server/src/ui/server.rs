//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    infrastructure::storage::local::UPLOADS_ROUTE,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, DispatchEventUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, UploadFileUseCase,
    },
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, upload_file, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Hiroba chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     dispatch_event_usecase,
///     disconnect_session_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
///     upload_file_usecase,
///     "uploads".into(),
/// );
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// Directory served under `/uploads`
    upload_dir: PathBuf,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_session_usecase` - UseCase for accepting connections
    /// * `dispatch_event_usecase` - UseCase for applying client events
    /// * `disconnect_session_usecase` - UseCase for closed connections
    /// * `get_rooms_usecase` - UseCase for listing rooms
    /// * `get_room_detail_usecase` - UseCase for getting room detail
    /// * `upload_file_usecase` - UseCase for storing uploads
    /// * `upload_dir` - Directory the upload store writes to
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        dispatch_event_usecase: Arc<DispatchEventUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        upload_file_usecase: Arc<UploadFileUseCase>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_session_usecase,
                dispatch_event_usecase,
                disconnect_session_usecase,
                get_rooms_usecase,
                get_room_detail_usecase,
                upload_file_usecase,
            }),
            upload_dir,
        }
    }

    /// Build the router with every endpoint and middleware attached.
    pub fn router(&self) -> Router {
        let body_limit = self
            .state
            .upload_file_usecase
            .max_bytes()
            .saturating_add(MULTIPART_OVERHEAD_BYTES);

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room}", get(get_room_detail))
            .route(
                "/upload",
                post(upload_file).layer(DefaultBodyLimit::max(body_limit)),
            )
            // アップロード済みファイルの配信
            .nest_service(UPLOADS_ROUTE, ServeDir::new(&self.upload_dir))
            .with_state(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Hiroba server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
