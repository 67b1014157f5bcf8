//! Job handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use hirelist_models::{Job, JobFilter, JobPatch, NewJob};

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

/// Job creation request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobCreateRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub equity: Option<f64>,
    #[validate(length(min = 1))]
    pub company_handle: String,
}

/// Create a job. Requires admin.
pub async fn create_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<JobCreateRequest>,
) -> ApiResult<(StatusCode, Json<JobResponse>)> {
    request.validate()?;

    let job = state
        .jobs()
        .create(&NewJob {
            title: request.title,
            salary: request.salary,
            equity: request.equity,
            company_handle: request.company_handle,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// Job list query params. `salary` and `equity` are minimum thresholds.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

/// List jobs, optionally filtered. Open endpoint.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> ApiResult<Json<JobsResponse>> {
    let filter = JobFilter {
        title: query.title,
        min_salary: query.salary,
        min_equity: query.equity,
    };

    let jobs = if filter.is_empty() {
        state.jobs().list().await?
    } else {
        state.jobs().search(&filter).await?
    };

    Ok(Json(JobsResponse { jobs }))
}

/// Fetch one job. Open endpoint.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<JobResponse>> {
    let job = state.jobs().get(id).await?;
    Ok(Json(JobResponse { job }))
}

/// Job update request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub equity: Option<f64>,
}

/// Partially update a job. Requires admin.
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
    Json(request): Json<JobUpdateRequest>,
) -> ApiResult<Json<JobResponse>> {
    request.validate()?;

    let job = state
        .jobs()
        .update(
            id,
            &JobPatch {
                title: request.title,
                salary: request.salary,
                equity: request.equity,
            },
        )
        .await?;

    Ok(Json(JobResponse { job }))
}

/// Delete a job. Requires admin.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
) -> ApiResult<Json<DeletedResponse>> {
    state.jobs().delete(id).await?;
    Ok(Json(DeletedResponse { deleted: id }))
}
