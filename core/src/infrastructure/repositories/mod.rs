pub mod crud_entity;
pub mod crud_repository;
