use axum::extract::State;
use coopdesk_core::domain::{
    branch::entities::Branch,
    crud::ports::CrudRepository,
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
    tag = "branch",
    summary = "Search branches",
    request_body = PaginatedRequest,
    responses(
        (status = 200, body = ListResponse<Branch>),
        (status = 400, description = "Invalid filter, sort or preload")
    ),
)]
pub async fn search_branches(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PaginatedRequest>,
) -> Result<Response<ListResponse<Branch>>, ApiError> {
    let ctx = state.request_context();
    let page = state
        .service
        .branches
        .list(&ctx, request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
