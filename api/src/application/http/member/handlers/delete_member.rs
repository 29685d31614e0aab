use axum::extract::{Path, State};
use coopdesk_core::domain::crud::ports::CrudRepository;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    delete,
    path = "/{member_id}",
    tag = "member",
    summary = "Delete member",
    params(
        ("member_id" = Uuid, Path, description = "Member ID"),
    ),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found")
    ),
)]
pub async fn delete_member(
    Path(member_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    let ctx = state.request_context();
    state
        .service
        .members
        .delete(&ctx, member_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
