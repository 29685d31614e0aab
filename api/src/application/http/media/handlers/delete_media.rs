use axum::extract::{Path, State};
use coopdesk_core::domain::media::ports::MediaService;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    delete,
    path = "/{media_id}",
    tag = "media",
    summary = "Delete media",
    description = "Removes the stored object, then its metadata row.",
    params(
        ("media_id" = Uuid, Path, description = "Media ID"),
    ),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 404, description = "Media not found"),
        (status = 409, description = "Media is still used as a member photo")
    ),
)]
pub async fn delete_media(
    Path(media_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    let ctx = state.request_context();
    state
        .service
        .media
        .delete_media(&ctx, media_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
