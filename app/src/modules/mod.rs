pub mod common;
pub mod station;
pub mod user;
