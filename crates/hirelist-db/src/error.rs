//! Database error types.

use thiserror::Error;

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Error types for database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[error("Pool error: {0}")]
    Pool(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate row (unique constraint or explicit duplicate check)
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Unknown username or wrong password
    #[error("Invalid username/password")]
    InvalidCredentials,

    /// Invalid builder input (empty update set, inverted employee range, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password hashing error
    #[error("Hash error: {0}")]
    Hash(String),
}

impl DbError {
    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a duplicate error.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }
}

impl From<bcrypt::BcryptError> for DbError {
    fn from(e: bcrypt::BcryptError) -> Self {
        Self::Hash(e.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for DbError {
    fn from(e: deadpool_postgres::PoolError) -> Self {
        Self::Pool(e.to_string())
    }
}
