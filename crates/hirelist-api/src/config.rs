//! API configuration.
//!
//! All tuning lives in this struct and is passed explicitly; there is no
//! process-global mutable configuration.

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HMAC secret for JWT signing
    pub secret_key: String,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origins: vec!["*".to_string()],
            database_url: "postgres://localhost:5432/hirelist".to_string(),
            secret_key: "secret-dev".to_string(),
            bcrypt_cost: 12,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            secret_key: std::env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.bcrypt_cost, 12);
        assert!(!config.is_production());
    }

    #[test]
    fn production_flag_is_case_insensitive() {
        let config = ApiConfig {
            environment: "Production".to_string(),
            ..Default::default()
        };
        assert!(config.is_production());
    }
}
