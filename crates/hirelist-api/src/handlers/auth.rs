//! Authentication handlers: token issuance and self-registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use hirelist_models::NewUser;

use crate::auth::create_token;
use crate::error::ApiResult;
use crate::state::AppState;

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Token response.
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange username/password for a JWT.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    request.validate()?;

    let user = state
        .users()
        .authenticate(&request.username, &request.password)
        .await?;
    let token = create_token(&user.username, user.is_admin, &state.config.secret_key)?;

    Ok(Json(TokenResponse { token }))
}

/// Registration request. Self-registered users are never admins.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
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
}

/// Register a new user and return a token for them.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    request.validate()?;

    let new_user = NewUser {
        username: request.username,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        is_admin: false,
    };

    let user = state
        .users()
        .register(&new_user, state.config.bcrypt_cost)
        .await?;
    let token = create_token(&user.username, user.is_admin, &state.config.secret_key)?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
