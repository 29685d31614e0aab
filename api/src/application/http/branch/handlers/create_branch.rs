use axum::extract::State;
use coopdesk_core::domain::{branch::entities::Branch, crud::ports::CrudRepository};

use crate::application::http::{
    branch::validators::CreateBranchValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "branch",
    summary = "Create branch",
    request_body = CreateBranchValidator,
    responses(
        (status = 201, body = Branch),
        (status = 409, description = "Branch code already taken")
    ),
)]
pub async fn create_branch(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateBranchValidator>,
) -> Result<Response<Branch>, ApiError> {
    let ctx = state.request_context();
    let branch = state
        .service
        .branches
        .create(&ctx, Branch::new(payload.into()))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(branch))
}
