pub mod appointment;
pub mod message;
pub mod user;
