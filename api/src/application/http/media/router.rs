use super::handlers::delete_media::{__path_delete_media, delete_media};
use super::handlers::get_download_url::{__path_get_download_url, get_download_url};
use super::handlers::get_media::{__path_get_media, get_media};
use super::handlers::get_media_list::{__path_get_media_list, get_media_list};
use super::handlers::search_media::{__path_search_media, search_media};
use super::handlers::upload_media::{__path_upload_media, upload_media};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use coopdesk_core::domain::media::value_objects::MAX_UPLOAD_BYTES;
use utoipa::OpenApi;

/// Multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(
    get_media_list,
    search_media,
    get_media,
    get_download_url,
    upload_media,
    delete_media
))]
pub struct MediaApiDoc;

pub fn media_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/media"),
            get(get_media_list)
                .post(upload_media)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD)),
        )
        .route(&format!("{root_path}/media/search"), post(search_media))
        .route(
            &format!("{root_path}/media/{{media_id}}"),
            get(get_media).delete(delete_media),
        )
        .route(
            &format!("{root_path}/media/{{media_id}}/download"),
            get(get_download_url),
        )
}
