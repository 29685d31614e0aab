pub mod get_footstep;
pub mod get_footsteps;
pub mod search_footsteps;
