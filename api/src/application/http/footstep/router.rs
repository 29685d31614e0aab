use super::handlers::get_footstep::{__path_get_footstep, get_footstep};
use super::handlers::get_footsteps::{__path_get_footsteps, get_footsteps};
use super::handlers::search_footsteps::{__path_search_footsteps, search_footsteps};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_footsteps, search_footsteps, get_footstep))]
pub struct FootstepApiDoc;

pub fn footstep_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/footsteps"), get(get_footsteps))
        .route(
            &format!("{root_path}/footsteps/search"),
            post(search_footsteps),
        )
        .route(
            &format!("{root_path}/footsteps/{{footstep_id}}"),
            get(get_footstep),
        )
}
