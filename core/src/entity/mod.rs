//! `SeaORM` entities, one module per table.

pub mod prelude;

pub mod branches;
pub mod footsteps;
pub mod media;
pub mod members;
