use axum::extract::{Path, State};
use coopdesk_core::domain::{crud::ports::CrudRepository, member::entities::Member};
use uuid::Uuid;

use crate::application::http::{
    member::validators::UpdateMemberValidator,
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
    path = "/{member_id}",
    tag = "member",
    summary = "Update member",
    params(
        ("member_id" = Uuid, Path, description = "Member ID"),
    ),
    request_body = UpdateMemberValidator,
    responses(
        (status = 200, body = Member),
        (status = 404, description = "Member not found")
    ),
)]
pub async fn update_member(
    Path(member_id): Path<Uuid>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateMemberValidator>,
) -> Result<Response<Member>, ApiError> {
    let ctx = state.request_context();
    let repository = &state.service.members;

    let current = repository
        .find_by_id(&ctx, member_id, &[])
        .await
        .map_err(ApiError::from)?;
    let member = repository
        .update(&ctx, current.apply(payload.into()))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(member))
}
