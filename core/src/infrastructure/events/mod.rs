pub mod bus;
pub mod listeners;
