pub mod cheese;
pub mod country;
pub mod user;
