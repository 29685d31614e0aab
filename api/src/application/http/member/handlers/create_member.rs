use axum::extract::State;
use coopdesk_core::domain::{crud::ports::CrudRepository, member::entities::Member};

use crate::application::http::{
    member::validators::CreateMemberValidator,
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
    tag = "member",
    summary = "Create member",
    request_body = CreateMemberValidator,
    responses(
        (status = 201, body = Member),
        (status = 409, description = "Email already taken or unknown branch")
    ),
)]
pub async fn create_member(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateMemberValidator>,
) -> Result<Response<Member>, ApiError> {
    let ctx = state.request_context();
    let member = state
        .service
        .members
        .create(&ctx, Member::new(payload.into()))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(member))
}
