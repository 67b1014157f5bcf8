//! PostgreSQL access layer for hirelist.
//!
//! This crate provides:
//! - Connection pool construction (`deadpool-postgres`)
//! - The parameterized SQL builders: partial-update SET clauses and
//!   filter-driven WHERE clauses
//! - One repository per entity (companies, jobs, users)

pub mod company;
pub mod error;
pub mod job;
pub mod pool;
pub mod sql;
pub mod user;

pub use company::CompanyRepo;
pub use error::{DbError, DbResult};
pub use job::JobRepo;
pub use pool::create_pool;
pub use sql::{SqlFragment, UpdateFields};
pub use user::UserRepo;
