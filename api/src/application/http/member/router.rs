use super::handlers::create_member::{__path_create_member, create_member};
use super::handlers::delete_member::{__path_delete_member, delete_member};
use super::handlers::get_member::{__path_get_member, get_member};
use super::handlers::get_members::{__path_get_members, get_members};
use super::handlers::list_all_members::{__path_list_all_members, list_all_members};
use super::handlers::search_members::{__path_search_members, search_members};
use super::handlers::update_member::{__path_update_member, update_member};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_members,
    search_members,
    list_all_members,
    get_member,
    create_member,
    update_member,
    delete_member
))]
pub struct MemberApiDoc;

pub fn member_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/members"),
            get(get_members).post(create_member),
        )
        .route(
            &format!("{root_path}/members/search"),
            post(search_members),
        )
        .route(&format!("{root_path}/members/all"), get(list_all_members))
        .route(
            &format!("{root_path}/members/{{member_id}}"),
            get(get_member).put(update_member).delete(delete_member),
        )
}
