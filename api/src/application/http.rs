pub mod branch;
pub mod events;
pub mod footstep;
pub mod health;
pub mod media;
pub mod member;
pub mod query_extractor;
pub mod query_params;
pub mod server;
