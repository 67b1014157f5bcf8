//! Shared data models for the hirelist backend.
//!
//! This crate provides Serde-serializable types for:
//! - Company records, creation payloads, patches, and search filters
//! - Job records, creation payloads, patches, and search filters
//! - User records, registration payloads, and patches
//!
//! JSON wire casing is camelCase (`numEmployees`, `companyHandle`, ...);
//! the database layer translates logical field names to snake_case columns.

pub mod company;
pub mod job;
pub mod user;

// Re-export common types
pub use company::{Company, CompanyFilter, CompanyPatch, NewCompany};
pub use job::{Job, JobFilter, JobPatch, NewJob};
pub use user::{AppliedJob, NewUser, User, UserDetail, UserPatch};
