pub mod crud;
pub mod mappers;
