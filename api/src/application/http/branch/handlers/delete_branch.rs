use axum::extract::{Path, State};
use coopdesk_core::domain::crud::ports::CrudRepository;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    delete,
    path = "/{branch_id}",
    tag = "branch",
    summary = "Delete branch",
    params(
        ("branch_id" = Uuid, Path, description = "Branch ID"),
    ),
    responses(
        (status = 204, description = "Branch deleted"),
        (status = 404, description = "Branch not found"),
        (status = 409, description = "Branch still has members")
    ),
)]
pub async fn delete_branch(
    Path(branch_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    let ctx = state.request_context();
    state
        .service
        .branches
        .delete(&ctx, branch_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
