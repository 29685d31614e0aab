use axum::extract::State;
use coopdesk_core::domain::{
    crud::ports::CrudRepository, footstep::entities::Footstep, query::pagination::PageResponse,
};

use crate::application::http::{
    query_extractor::ListQuery,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "footstep",
    summary = "List footsteps",
    description = "Audit trail of recorded writes, newest last unless sorted otherwise. Accepts the same filter encodings as every other list endpoint.",
    params(
        ("filter" = Option<String>, Query, description = "Base64 JSON list request"),
        ("pageIndex" = Option<i64>, Query, description = "1-based page"),
        ("pageSize" = Option<i64>, Query, description = "Rows per page, at most 100"),
        ("sort" = Option<String>, Query, description = "Sort field, `-` prefix for descending"),
        ("logic" = Option<String>, Query, description = "`and` or `or`"),
    ),
    responses(
        (status = 200, body = PageResponse<Footstep>),
        (status = 400, description = "Invalid filter, sort or preload")
    ),
)]
pub async fn get_footsteps(
    State(state): State<AppState>,
    ListQuery(request): ListQuery,
) -> Result<Response<PageResponse<Footstep>>, ApiError> {
    let ctx = state.request_context();
    let page = state
        .service
        .footsteps
        .list(&ctx, request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(PageResponse::from(page)))
}
