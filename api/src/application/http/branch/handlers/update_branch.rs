use axum::extract::{Path, State};
use coopdesk_core::domain::{branch::entities::Branch, crud::ports::CrudRepository};
use uuid::Uuid;

use crate::application::http::{
    branch::validators::UpdateBranchValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    put,
    path = "/{branch_id}",
    tag = "branch",
    summary = "Update branch",
    params(
        ("branch_id" = Uuid, Path, description = "Branch ID"),
    ),
    request_body = UpdateBranchValidator,
    responses(
        (status = 200, body = Branch),
        (status = 404, description = "Branch not found")
    ),
)]
pub async fn update_branch(
    Path(branch_id): Path<Uuid>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateBranchValidator>,
) -> Result<Response<Branch>, ApiError> {
    let ctx = state.request_context();
    let repository = &state.service.branches;

    let current = repository
        .find_by_id(&ctx, branch_id, &[])
        .await
        .map_err(ApiError::from)?;
    let branch = repository
        .update(&ctx, current.apply(payload.into()))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(branch))
}
