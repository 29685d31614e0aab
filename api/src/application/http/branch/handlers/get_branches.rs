use axum::extract::State;
use coopdesk_core::domain::{
    branch::entities::Branch, crud::ports::CrudRepository, query::pagination::PageResponse,
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
    tag = "branch",
    summary = "List branches",
    description = "Filters, sorts and pages branches. Filters come either as a base64 `filter` parameter holding a JSON list request, or as `filter[field][op]=value` pairs.",
    params(
        ("filter" = Option<String>, Query, description = "Base64 JSON list request"),
        ("pageIndex" = Option<i64>, Query, description = "1-based page"),
        ("pageSize" = Option<i64>, Query, description = "Rows per page, at most 100"),
        ("sort" = Option<String>, Query, description = "Sort field, `-` prefix for descending"),
        ("logic" = Option<String>, Query, description = "`and` or `or`"),
        ("preload" = Option<String>, Query, description = "Comma separated relations"),
    ),
    responses(
        (status = 200, body = PageResponse<Branch>),
        (status = 400, description = "Invalid filter, sort or preload")
    ),
)]
pub async fn get_branches(
    State(state): State<AppState>,
    ListQuery(request): ListQuery,
) -> Result<Response<PageResponse<Branch>>, ApiError> {
    let ctx = state.request_context();
    let page = state
        .service
        .branches
        .list(&ctx, request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(PageResponse::from(page)))
}
