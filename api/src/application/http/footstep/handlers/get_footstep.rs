use axum::extract::{Path, State};
use coopdesk_core::domain::{crud::ports::CrudRepository, footstep::entities::Footstep};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{footstep_id}",
    tag = "footstep",
    summary = "Get footstep",
    params(
        ("footstep_id" = Uuid, Path, description = "Footstep ID"),
    ),
    responses(
        (status = 200, body = Footstep),
        (status = 404, description = "Footstep not found")
    ),
)]
pub async fn get_footstep(
    Path(footstep_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<Footstep>, ApiError> {
    let ctx = state.request_context();
    let footstep = state
        .service
        .footsteps
        .find_by_id(&ctx, footstep_id, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(footstep))
}
