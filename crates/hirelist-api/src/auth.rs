//! JWT bearer authentication.
//!
//! Tokens are HS256-signed with the configured secret and carry the
//! username and admin flag. They have no expiry; a token stays valid until
//! the secret is rotated.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued for
    pub username: String,
    /// Admin flag
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Issued at (unix seconds)
    pub iat: i64,
}

/// Sign a token for a user.
pub fn create_token(username: &str, is_admin: bool, secret: &str) -> Result<String, ApiError> {
    let claims = Claims {
        username: username.to_string(),
        is_admin,
        iat: Utc::now().timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("Token signing failed: {e}")))
}

/// Verify a token's signature and decode its claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens carry no exp claim.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| ApiError::unauthorized(format!("Token validation failed: {e}")))
}

/// Authenticated user extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl AuthUser {
    /// Require that the caller is `username` themselves or an admin.
    pub fn ensure_self_or_admin(&self, username: &str) -> Result<(), ApiError> {
        if self.username == username || self.is_admin {
            Ok(())
        } else {
            Err(ApiError::forbidden(
                "Must be the user in question or an admin",
            ))
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header format"))?;

        let claims = verify_token(token, &state.config.secret_key)?;

        Ok(AuthUser {
            username: claims.username,
            is_admin: claims.is_admin,
        })
    }
}

/// Authenticated admin. Rejects non-admin tokens with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminUser(user))
    }
}
