//! Turns decoded filter requests into sea-orm conditions, ordering and paging.

pub mod combinator;
pub mod field_map;
pub mod plan;
pub mod predicate;
pub mod sort;
