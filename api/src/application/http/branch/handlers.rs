pub mod create_branch;
pub mod delete_branch;
pub mod get_branch;
pub mod get_branches;
pub mod list_all_branches;
pub mod search_branches;
pub mod update_branch;
