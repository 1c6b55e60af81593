pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod helpers;
pub mod routes;

pub use database::Database;
pub use error::ApiError;
pub use gateway::Gateway;
