pub mod errors;
pub mod models;
pub mod ports;
pub mod reporter;
pub mod service;
