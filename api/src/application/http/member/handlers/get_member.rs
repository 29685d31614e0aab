use axum::extract::{Path, Query, State};
use coopdesk_core::domain::{crud::ports::CrudRepository, member::entities::Member};
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
    path = "/{member_id}",
    tag = "member",
    summary = "Get member",
    params(
        ("member_id" = Uuid, Path, description = "Member ID"),
        PreloadQuery
    ),
    responses(
        (status = 200, body = Member),
        (status = 404, description = "Member not found")
    ),
)]
pub async fn get_member(
    Path(member_id): Path<Uuid>,
    Query(query): Query<PreloadQuery>,
    State(state): State<AppState>,
) -> Result<Response<Member>, ApiError> {
    let ctx = state.request_context();
    let member = state
        .service
        .members
        .find_by_id(&ctx, member_id, &query.names())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(member))
}
