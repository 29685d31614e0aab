use axum::extract::State;
use coopdesk_core::domain::{
    crud::ports::CrudRepository,
    footstep::entities::Footstep,
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
    tag = "footstep",
    summary = "Search footsteps",
    request_body = PaginatedRequest,
    responses(
        (status = 200, body = ListResponse<Footstep>),
        (status = 400, description = "Invalid filter, sort or preload")
    ),
)]
pub async fn search_footsteps(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PaginatedRequest>,
) -> Result<Response<ListResponse<Footstep>>, ApiError> {
    let ctx = state.request_context();
    let page = state
        .service
        .footsteps
        .list(&ctx, request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
