//! Axum HTTP API server for the hirelist jobs board.
//!
//! This crate provides:
//! - REST endpoints for auth, companies, jobs, and users
//! - JWT bearer authentication with login/admin/self-or-admin guards
//! - Request validation, request-id and logging middleware

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
