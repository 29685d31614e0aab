use axum::extract::State;
use coopdesk_core::domain::{
    crud::ports::CrudRepository, media::entities::Media, query::pagination::PageResponse,
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
    tag = "media",
    summary = "List media",
    description = "Filters, sorts and pages stored file metadata.",
    params(
        ("filter" = Option<String>, Query, description = "Base64 JSON list request"),
        ("pageIndex" = Option<i64>, Query, description = "1-based page"),
        ("pageSize" = Option<i64>, Query, description = "Rows per page, at most 100"),
        ("sort" = Option<String>, Query, description = "Sort field, `-` prefix for descending"),
        ("logic" = Option<String>, Query, description = "`and` or `or`"),
    ),
    responses(
        (status = 200, body = PageResponse<Media>),
        (status = 400, description = "Invalid filter, sort or preload")
    ),
)]
pub async fn get_media_list(
    State(state): State<AppState>,
    ListQuery(request): ListQuery,
) -> Result<Response<PageResponse<Media>>, ApiError> {
    let ctx = state.request_context();
    let page = state
        .service
        .media_records
        .list(&ctx, request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(PageResponse::from(page)))
}
