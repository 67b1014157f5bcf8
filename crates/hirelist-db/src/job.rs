//! Job repository.

use std::sync::Arc;

use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::debug;

use hirelist_models::{Job, JobFilter, JobPatch, NewJob};

use crate::error::{DbError, DbResult};
use crate::sql::{self, SqlFragment, UpdateFields};

/// Logical field name -> column name for partial updates.
const COLUMN_MAP: &[(&str, &str)] = &[("companyHandle", "company_handle")];

const SELECT: &str = "SELECT id, title, salary, equity, company_handle FROM jobs";

/// Repository for job rows.
#[derive(Clone)]
pub struct JobRepo {
    pool: Pool,
}

impl JobRepo {
    /// Create a new job repository.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a job. Fails with [`DbError::Duplicate`] when the company
    /// already lists a job with the same title.
    pub async fn create(&self, new: &NewJob) -> DbResult<Job> {
        let client = self.pool.get().await?;

        let duplicate = client
            .query_opt(
                "SELECT id FROM jobs WHERE title = $1 AND company_handle = $2",
                &[&new.title, &new.company_handle],
            )
            .await?;
        if duplicate.is_some() {
            return Err(DbError::duplicate(format!(
                "Duplicate job for {}: {}",
                new.company_handle, new.title
            )));
        }

        let row = client
            .query_one(
                "INSERT INTO jobs (title, salary, equity, company_handle)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, title, salary, equity, company_handle",
                &[&new.title, &new.salary, &new.equity, &new.company_handle],
            )
            .await?;

        debug!(title = %new.title, company = %new.company_handle, "created job");
        job_from_row(&row)
    }

    /// List all jobs ordered by title.
    pub async fn list(&self) -> DbResult<Vec<Job>> {
        let client = self.pool.get().await?;
        let query = format!("{SELECT} ORDER BY title");
        let rows = client.query(query.as_str(), &[]).await?;
        rows.iter().map(job_from_row).collect()
    }

    /// Search jobs by filter criteria. An empty filter returns the full
    /// collection.
    pub async fn search(&self, filter: &JobFilter) -> DbResult<Vec<Job>> {
        let fragment = sql::job_where_clause(filter)?;
        let query = if fragment.is_empty() {
            format!("{SELECT} ORDER BY title")
        } else {
            format!("{SELECT} WHERE {} ORDER BY title", fragment.clause)
        };

        let client = self.pool.get().await?;
        let rows = client
            .query(query.as_str(), &fragment.params_ref())
            .await?;
        rows.iter().map(job_from_row).collect()
    }

    /// Fetch one job by id.
    pub async fn get(&self, id: i32) -> DbResult<Job> {
        let client = self.pool.get().await?;
        let query = format!("{SELECT} WHERE id = $1");
        let row = client.query_opt(query.as_str(), &[&id]).await?;

        match row {
            Some(row) => job_from_row(&row),
            None => Err(DbError::not_found(format!("No job: {id}"))),
        }
    }

    /// Partially update a job; only the patch fields that are present are
    /// written.
    pub async fn update(&self, id: i32, patch: &JobPatch) -> DbResult<Job> {
        let fields = UpdateFields::new()
            .maybe_set("title", patch.title.clone())
            .maybe_set("salary", patch.salary)
            .maybe_set("equity", patch.equity);
        let SqlFragment { clause, mut params } = sql::build_set_clause(fields, COLUMN_MAP)?;

        params.push(Arc::new(id));
        let query = format!(
            "UPDATE jobs SET {clause} WHERE id = ${}
             RETURNING id, title, salary, equity, company_handle",
            params.len()
        );

        let client = self.pool.get().await?;
        let row = client
            .query_opt(query.as_str(), &sql::params_ref(&params))
            .await?;

        match row {
            Some(row) => {
                debug!(id, "updated job");
                job_from_row(&row)
            }
            None => Err(DbError::not_found(format!("No job: {id}"))),
        }
    }

    /// Delete a job by id.
    pub async fn delete(&self, id: i32) -> DbResult<()> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("DELETE FROM jobs WHERE id = $1 RETURNING id", &[&id])
            .await?;

        if row.is_none() {
            return Err(DbError::not_found(format!("No job: {id}")));
        }
        debug!(id, "deleted job");
        Ok(())
    }
}

fn job_from_row(row: &Row) -> DbResult<Job> {
    Ok(Job {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        salary: row.try_get("salary")?,
        equity: row.try_get("equity")?,
        company_handle: row.try_get("company_handle")?,
    })
}
