//! Company handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use hirelist_models::{Company, CompanyFilter, CompanyPatch, NewCompany};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

#[derive(Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

/// Company creation request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCreateRequest {
    #[validate(length(min = 1, max = 25))]
    pub handle: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[serde(default)]
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Create a company. Requires login.
pub async fn create_company(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<CompanyCreateRequest>,
) -> ApiResult<(StatusCode, Json<CompanyResponse>)> {
    request.validate()?;

    let company = state
        .companies()
        .create(&NewCompany {
            handle: request.handle,
            name: request.name,
            description: request.description,
            num_employees: request.num_employees,
            logo_url: request.logo_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// Company list query params.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListQuery {
    pub name_like: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

/// List companies, optionally filtered. Open endpoint.
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> ApiResult<Json<CompaniesResponse>> {
    let filter = CompanyFilter {
        name: query.name_like,
        min_employees: query.min_employees,
        max_employees: query.max_employees,
    };

    let companies = if filter.is_empty() {
        state.companies().list().await?
    } else {
        state.companies().search(&filter).await?
    };

    Ok(Json(CompaniesResponse { companies }))
}

/// Fetch one company. Open endpoint.
pub async fn get_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> ApiResult<Json<CompanyResponse>> {
    let company = state.companies().get(&handle).await?;
    Ok(Json(CompanyResponse { company }))
}

/// Company update request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdateRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[serde(default)]
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Partially update a company. Requires login.
pub async fn update_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    _user: AuthUser,
    Json(request): Json<CompanyUpdateRequest>,
) -> ApiResult<Json<CompanyResponse>> {
    request.validate()?;

    let company = state
        .companies()
        .update(
            &handle,
            &CompanyPatch {
                name: request.name,
                description: request.description,
                num_employees: request.num_employees,
                logo_url: request.logo_url,
            },
        )
        .await?;

    Ok(Json(CompanyResponse { company }))
}

/// Delete a company. Requires login.
pub async fn delete_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    _user: AuthUser,
) -> ApiResult<Json<DeletedResponse>> {
    state.companies().delete(&handle).await?;
    Ok(Json(DeletedResponse { deleted: handle }))
}
