//! File upload handler.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartError},
    },
    http::StatusCode,
};

use crate::{
    domain::UploadError,
    infrastructure::dto::http::{ErrorResponseDto, UploadResponseDto},
    ui::state::AppState,
};

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

type ErrorResponse = (StatusCode, Json<ErrorResponseDto>);

/// `POST /upload`
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponseDto>, ErrorResponse> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        return store_field(&state, field).await;
    }

    tracing::warn!("Upload request without a '{}' field", FILE_FIELD);
    Err(upload_error(UploadError::MissingFile))
}

async fn store_field(
    state: &AppState,
    field: Field<'_>,
) -> Result<Json<UploadResponseDto>, ErrorResponse> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    let attachment = state
        .upload_file_usecase
        .execute(file_name.as_deref(), content_type.as_deref(), &bytes)
        .await
        .map_err(upload_error)?;

    Ok(Json(attachment.into()))
}

fn upload_error(error: UploadError) -> ErrorResponse {
    let status = match &error {
        UploadError::MissingFile => StatusCode::BAD_REQUEST,
        UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        UploadError::Io(e) => {
            tracing::error!("Failed to store upload: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}

fn multipart_error(error: MultipartError) -> ErrorResponse {
    tracing::warn!("Malformed upload: {}", error.body_text());
    error_response(error.status(), error.body_text())
}

fn error_response(status: StatusCode, error: String) -> ErrorResponse {
    (status, Json(ErrorResponseDto { error }))
}
