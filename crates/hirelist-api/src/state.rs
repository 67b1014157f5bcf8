//! Application state.

use deadpool_postgres::Pool;

use hirelist_db::{CompanyRepo, DbError, JobRepo, UserRepo};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub db: Pool,
}

impl AppState {
    /// Create new application state. The pool is lazy; the first query
    /// opens the first connection.
    pub fn new(config: ApiConfig) -> Result<Self, DbError> {
        let db = hirelist_db::create_pool(&config.database_url)?;
        Ok(Self { config, db })
    }

    pub fn companies(&self) -> CompanyRepo {
        CompanyRepo::new(self.db.clone())
    }

    pub fn jobs(&self) -> JobRepo {
        JobRepo::new(self.db.clone())
    }

    pub fn users(&self) -> UserRepo {
        UserRepo::new(self.db.clone())
    }
}
