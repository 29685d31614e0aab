pub mod branch;
pub mod db;
pub mod events;
pub mod footstep;
pub mod media;
pub mod member;
pub mod object_storage;
pub mod query;
pub mod repositories;
