pub mod auth;
pub mod cheese;
pub mod shared;
