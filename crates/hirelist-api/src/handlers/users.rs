//! User handlers.
//!
//! Listing and admin creation require an admin token; per-user routes
//! accept the user themselves or an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use hirelist_models::{NewUser, User, UserDetail, UserPatch};

use crate::auth::{create_token, AdminUser, AuthUser};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Serialize)]
pub struct UserDetailResponse {
    pub user: UserDetail,
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

#[derive(Serialize)]
pub struct AppliedResponse {
    pub applied: i32,
}

/// Admin user-creation request. Unlike self-registration, the created
/// user may be an admin.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[validate(length(min = 1, max = 25))]
    pub username: String,
    #[validate(length(min = 5, max = 100))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Serialize)]
pub struct UserCreatedResponse {
    pub user: User,
    pub token: String,
}

/// Create a user (admin only); returns the user and a token for them.
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<UserCreateRequest>,
) -> ApiResult<(StatusCode, Json<UserCreatedResponse>)> {
    request.validate()?;

    let user = state
        .users()
        .register(
            &NewUser {
                username: request.username,
                password: request.password,
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                is_admin: request.is_admin,
            },
            state.config.bcrypt_cost,
        )
        .await?;
    let token = create_token(&user.username, user.is_admin, &state.config.secret_key)?;

    Ok((StatusCode::CREATED, Json(UserCreatedResponse { user, token })))
}

/// List all users. Requires admin.
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<UsersResponse>> {
    let users = state.users().list().await?;
    Ok(Json(UsersResponse { users }))
}

/// Fetch one user with their applications. Self or admin.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    auth: AuthUser,
) -> ApiResult<Json<UserDetailResponse>> {
    auth.ensure_self_or_admin(&username)?;
    let user = state.users().get(&username).await?;
    Ok(Json(UserDetailResponse { user }))
}

/// User update request. The admin flag is deliberately not patchable
/// through the API.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 5, max = 100))]
    pub password: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
}

/// Partially update a user. Self or admin.
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    auth: AuthUser,
    Json(request): Json<UserUpdateRequest>,
) -> ApiResult<Json<UserResponse>> {
    auth.ensure_self_or_admin(&username)?;
    request.validate()?;

    let user = state
        .users()
        .update(
            &username,
            &UserPatch {
                first_name: request.first_name,
                last_name: request.last_name,
                password: request.password,
                email: request.email,
                is_admin: None,
            },
            state.config.bcrypt_cost,
        )
        .await?;

    Ok(Json(UserResponse { user }))
}

/// Delete a user. Self or admin.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    auth: AuthUser,
) -> ApiResult<Json<DeletedResponse>> {
    auth.ensure_self_or_admin(&username)?;
    state.users().delete(&username).await?;
    Ok(Json(DeletedResponse { deleted: username }))
}

/// Apply for a job on behalf of a user. Self or admin.
pub async fn apply_for_job(
    State(state): State<AppState>,
    Path((username, job_id)): Path<(String, i32)>,
    auth: AuthUser,
) -> ApiResult<Json<AppliedResponse>> {
    auth.ensure_self_or_admin(&username)?;
    state.users().apply_for_job(&username, job_id).await?;
    Ok(Json(AppliedResponse { applied: job_id }))
}
