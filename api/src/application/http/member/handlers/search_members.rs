use axum::extract::State;
use coopdesk_core::domain::{
    crud::ports::CrudRepository,
    member::entities::Member,
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
    tag = "member",
    summary = "Search members",
    description = "Same as the list endpoint with the request in the body. `preloads` accepts `branch` and `photo`.",
    request_body = PaginatedRequest,
    responses(
        (status = 200, body = ListResponse<Member>),
        (status = 400, description = "Invalid filter, sort or preload")
    ),
)]
pub async fn search_members(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PaginatedRequest>,
) -> Result<Response<ListResponse<Member>>, ApiError> {
    let ctx = state.request_context();
    let page = state
        .service
        .members
        .list(&ctx, request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
