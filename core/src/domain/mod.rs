pub mod branch;
pub mod common;
pub mod crud;
pub mod events;
pub mod footstep;
pub mod media;
pub mod member;
pub mod query;
