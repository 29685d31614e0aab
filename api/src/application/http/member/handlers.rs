pub mod create_member;
pub mod delete_member;
pub mod get_member;
pub mod get_members;
pub mod list_all_members;
pub mod search_members;
pub mod update_member;
