pub mod account;
pub mod auth;
pub mod cheese;
pub mod pages;
