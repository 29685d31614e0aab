use axum::extract::{Multipart, State};
use coopdesk_core::domain::media::{
    entities::Media, ports::MediaService, value_objects::UploadMediaInput,
};
use tracing::error;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "",
    tag = "media",
    summary = "Upload a file",
    description = "Multipart upload with a single `file` field. The binary goes to object storage, then its metadata row is recorded.",
    responses(
        (status = 201, description = "File uploaded", body = Media),
        (status = 400, description = "Missing or empty file"),
        (status = 413, description = "File too large")
    ),
)]
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<Media>, ApiError> {
    let mut upload: Option<UploadMediaInput> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Missing filename in file field".to_string()))?;
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(|e| {
            error!("Failed to read file bytes: {}", e);
            ApiError::BadRequest(format!("Failed to read file: {}", e))
        })?;

        upload = Some(UploadMediaInput {
            file_name,
            mime_type,
            data,
        });
    }

    let upload = upload.ok_or_else(|| {
        ApiError::BadRequest("Missing 'file' field in multipart form".to_string())
    })?;

    let ctx = state.request_context();
    let media = state
        .service
        .media
        .upload_media(&ctx, upload)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(media))
}
