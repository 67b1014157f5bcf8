//! API routes.

use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::auth::{login, register};
use crate::handlers::companies::{
    create_company, delete_company, get_company, list_companies, update_company,
};
use crate::handlers::health::{health, ready};
use crate::handlers::jobs::{create_job, delete_job, get_job, list_jobs, update_job};
use crate::handlers::users::{
    apply_for_job, create_user, delete_user, get_user, list_users, update_user,
};
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/token", post(login))
        .route("/register", post(register));

    let company_routes = Router::new()
        .route("/", post(create_company))
        .route("/", get(list_companies))
        .route("/:handle", get(get_company))
        .route("/:handle", patch(update_company))
        .route("/:handle", delete(delete_company));

    let job_routes = Router::new()
        .route("/", post(create_job))
        .route("/", get(list_jobs))
        .route("/:id", get(get_job))
        .route("/:id", patch(update_job))
        .route("/:id", delete(delete_job));

    let user_routes = Router::new()
        .route("/", post(create_user))
        .route("/", get(list_users))
        .route("/:username", get(get_user))
        .route("/:username", patch(update_user))
        .route("/:username", delete(delete_user))
        .route("/:username/jobs/:id", post(apply_for_job));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/companies", company_routes)
        .nest("/jobs", job_routes)
        .nest("/users", user_routes)
        .merge(health_routes)
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
