//! Hiroba chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --room-capacity 20
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    config::ServerConfig,
    domain::SessionOrchestrator,
    infrastructure::{message_pusher::WebSocketMessagePusher, storage::LocalAttachmentStore},
    ui::Server,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, DispatchEventUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, UploadFileUseCase, share,
    },
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Room-based chat server with presence tracking", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,

    /// Maximum number of users per room
    #[arg(long, default_value = "100")]
    room_capacity: usize,

    /// Number of messages retained per room
    #[arg(long, default_value = "100")]
    history_limit: usize,

    /// Directory uploaded files are stored in
    #[arg(long, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Largest accepted upload in bytes
    #[arg(long, default_value = "52428800")]
    max_upload_bytes: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            room_capacity: args.room_capacity,
            history_limit: args.history_limit,
            upload_dir: args.upload_dir,
            max_upload_bytes: args.max_upload_bytes,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Initialize dependencies in order:
    // 1. Orchestrator (in-memory users, presence and history)
    // 2. MessagePusher and AttachmentStore
    // 3. UseCases
    // 4. Server

    // 1. Create the orchestrator behind the single lock
    let orchestrator = share(SessionOrchestrator::new(
        config.room_capacity,
        config.history_limit,
    ));

    // 2. Create MessagePusher (WebSocket implementation) and the upload store
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let attachment_store =
        match LocalAttachmentStore::new(config.upload_dir.clone(), config.max_upload_bytes).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(
                    "Failed to prepare upload directory '{}': {}",
                    config.upload_dir.display(),
                    e
                );
                std::process::exit(1);
            }
        };

    // 3. Create UseCases
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(message_pusher.clone()));
    let dispatch_event_usecase = Arc::new(DispatchEventUseCase::new(
        orchestrator.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
    ));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(
        dispatch_event_usecase.clone(),
        message_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(orchestrator.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(orchestrator.clone()));
    let upload_file_usecase = Arc::new(UploadFileUseCase::new(attachment_store));

    // 4. Create and run the server
    let server = Server::new(
        connect_session_usecase,
        dispatch_event_usecase,
        disconnect_session_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        upload_file_usecase,
        config.upload_dir.clone(),
    );
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
