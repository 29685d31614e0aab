//! Request-scoped value objects of the dynamic filter and pagination engine.
//!
//! Nothing in here talks to the database: a [`filter::PaginatedRequest`] is decoded
//! into typed [`filter::Filter`]s once, and the infrastructure layer turns those into
//! sea-orm conditions against an entity's field table.

pub mod errors;
pub mod filter;
pub mod operator;
pub mod pagination;
pub mod sanitizer;
pub mod value;
