pub mod delete_media;
pub mod get_download_url;
pub mod get_media;
pub mod get_media_list;
pub mod search_media;
pub mod upload_media;
