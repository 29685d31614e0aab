use axum::extract::{Query, State};
use coopdesk_core::domain::{crud::ports::CrudRepository, member::entities::Member};

use crate::application::http::{
    query_params::PreloadQuery,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/all",
    tag = "member",
    summary = "List every member",
    params(PreloadQuery),
    responses(
        (status = 200, body = Vec<Member>),
        (status = 400, description = "Unknown preload")
    ),
)]
pub async fn list_all_members(
    Query(query): Query<PreloadQuery>,
    State(state): State<AppState>,
) -> Result<Response<Vec<Member>>, ApiError> {
    let ctx = state.request_context();
    let members = state
        .service
        .members
        .find_all(&ctx, &query.names())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(members))
}
