use axum::extract::State;
use coopdesk_core::domain::{branch::entities::Branch, crud::ports::CrudRepository};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/all",
    tag = "branch",
    summary = "List every branch",
    responses(
        (status = 200, body = Vec<Branch>)
    ),
)]
pub async fn list_all_branches(
    State(state): State<AppState>,
) -> Result<Response<Vec<Branch>>, ApiError> {
    let ctx = state.request_context();
    let branches = state
        .service
        .branches
        .find_all(&ctx, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(branches))
}
