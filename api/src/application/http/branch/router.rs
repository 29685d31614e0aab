use super::handlers::create_branch::{__path_create_branch, create_branch};
use super::handlers::delete_branch::{__path_delete_branch, delete_branch};
use super::handlers::get_branch::{__path_get_branch, get_branch};
use super::handlers::get_branches::{__path_get_branches, get_branches};
use super::handlers::list_all_branches::{__path_list_all_branches, list_all_branches};
use super::handlers::search_branches::{__path_search_branches, search_branches};
use super::handlers::update_branch::{__path_update_branch, update_branch};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_branches,
    search_branches,
    list_all_branches,
    get_branch,
    create_branch,
    update_branch,
    delete_branch
))]
pub struct BranchApiDoc;

pub fn branch_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/branches"),
            get(get_branches).post(create_branch),
        )
        .route(
            &format!("{root_path}/branches/search"),
            post(search_branches),
        )
        .route(&format!("{root_path}/branches/all"), get(list_all_branches))
        .route(
            &format!("{root_path}/branches/{{branch_id}}"),
            get(get_branch).put(update_branch).delete(delete_branch),
        )
}
