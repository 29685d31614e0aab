use axum::extract::{Path, Query, State};
use coopdesk_core::domain::{branch::entities::Branch, crud::ports::CrudRepository};
use uuid::Uuid;

use crate::application::http::{
    query_params::PreloadQuery,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{branch_id}",
    tag = "branch",
    summary = "Get branch",
    params(
        ("branch_id" = Uuid, Path, description = "Branch ID"),
        PreloadQuery
    ),
    responses(
        (status = 200, body = Branch),
        (status = 404, description = "Branch not found")
    ),
)]
pub async fn get_branch(
    Path(branch_id): Path<Uuid>,
    Query(query): Query<PreloadQuery>,
    State(state): State<AppState>,
) -> Result<Response<Branch>, ApiError> {
    let ctx = state.request_context();
    let branch = state
        .service
        .branches
        .find_by_id(&ctx, branch_id, &query.names())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(branch))
}
