use axum::extract::{Path, State};
use coopdesk_core::domain::{crud::ports::CrudRepository, media::entities::Media};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{media_id}",
    tag = "media",
    summary = "Get media metadata",
    params(
        ("media_id" = Uuid, Path, description = "Media ID"),
    ),
    responses(
        (status = 200, body = Media),
        (status = 404, description = "Media not found")
    ),
)]
pub async fn get_media(
    Path(media_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<Media>, ApiError> {
    let ctx = state.request_context();
    let media = state
        .service
        .media_records
        .find_by_id(&ctx, media_id, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(media))
}
