use axum::extract::{Path, State};
use coopdesk_core::domain::media::{entities::PresignedUrl, ports::MediaService};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{media_id}/download",
    tag = "media",
    summary = "Get a download URL",
    description = "Returns a time limited presigned URL for the stored object.",
    params(
        ("media_id" = Uuid, Path, description = "Media ID"),
    ),
    responses(
        (status = 200, body = PresignedUrl),
        (status = 404, description = "Media not found"),
        (status = 502, description = "Object storage unavailable")
    ),
)]
pub async fn get_download_url(
    Path(media_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<PresignedUrl>, ApiError> {
    let ctx = state.request_context();
    let url = state
        .service
        .media
        .get_download_url(&ctx, media_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(url))
}
