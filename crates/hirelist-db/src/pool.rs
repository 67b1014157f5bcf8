//! Connection pool utilities.

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

use crate::error::{DbError, DbResult};

/// Create a connection pool from a database URL.
///
/// Uses `NoTls` and a small default size, which is suitable for local and
/// single-node deployments. Pool construction is lazy: no connection is
/// opened until a client is checked out.
pub fn create_pool(database_url: &str) -> DbResult<Pool> {
    create_pool_with_size(database_url, 16)
}

/// Create a connection pool with an explicit maximum size.
pub fn create_pool_with_size(database_url: &str, max_size: usize) -> DbResult<Pool> {
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| DbError::Connection(e.to_string()))?;

    let mgr = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );

    Pool::builder(mgr)
        .max_size(max_size)
        .build()
        .map_err(|e| DbError::Pool(e.to_string()))
}
