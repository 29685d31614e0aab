use axum::extract::State;
use coopdesk_core::domain::{
    crud::ports::CrudRepository,
    media::entities::Media,
    query::{filter::PaginatedRequest, pagination::ListResponse},
};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, JsonBody},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/search",
    tag = "media",
    summary = "Search media",
    request_body = PaginatedRequest,
    responses(
        (status = 200, body = ListResponse<Media>),
        (status = 400, description = "Invalid filter, sort or preload")
    ),
)]
pub async fn search_media(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PaginatedRequest>,
) -> Result<Response<ListResponse<Media>>, ApiError> {
    let ctx = state.request_context();
    let page = state
        .service
        .media_records
        .list(&ctx, request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
