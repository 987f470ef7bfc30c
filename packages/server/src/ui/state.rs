//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, DispatchEventUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase, UploadFileUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（接続受け付けのユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DispatchEventUseCase（セッションイベント処理のユースケース）
    pub dispatch_event_usecase: Arc<DispatchEventUseCase>,
    /// DisconnectSessionUseCase（接続終了のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// UploadFileUseCase（ファイルアップロードのユースケース）
    pub upload_file_usecase: Arc<UploadFileUseCase>,
}
