pub mod auth;
pub mod context;
pub mod user;
