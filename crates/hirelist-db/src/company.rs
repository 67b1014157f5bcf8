//! Company repository.

use std::sync::Arc;

use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::debug;

use hirelist_models::{Company, CompanyFilter, CompanyPatch, NewCompany};

use crate::error::{DbError, DbResult};
use crate::sql::{self, SqlFragment, UpdateFields};

/// Logical field name -> column name for partial updates.
const COLUMN_MAP: &[(&str, &str)] = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

const SELECT: &str =
    "SELECT handle, name, description, num_employees, logo_url FROM companies";

/// Repository for company rows.
#[derive(Clone)]
pub struct CompanyRepo {
    pool: Pool,
}

impl CompanyRepo {
    /// Create a new company repository.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a company. Fails with [`DbError::Duplicate`] when the handle
    /// is already taken.
    pub async fn create(&self, new: &NewCompany) -> DbResult<Company> {
        let client = self.pool.get().await?;

        let duplicate = client
            .query_opt("SELECT handle FROM companies WHERE handle = $1", &[&new.handle])
            .await?;
        if duplicate.is_some() {
            return Err(DbError::duplicate(format!(
                "Duplicate company: {}",
                new.handle
            )));
        }

        let row = client
            .query_one(
                "INSERT INTO companies (handle, name, description, num_employees, logo_url)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING handle, name, description, num_employees, logo_url",
                &[
                    &new.handle,
                    &new.name,
                    &new.description,
                    &new.num_employees,
                    &new.logo_url,
                ],
            )
            .await?;

        debug!(handle = %new.handle, "created company");
        company_from_row(&row)
    }

    /// List all companies ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Company>> {
        let client = self.pool.get().await?;
        let query = format!("{SELECT} ORDER BY name");
        let rows = client.query(query.as_str(), &[]).await?;
        rows.iter().map(company_from_row).collect()
    }

    /// Search companies by filter criteria. An empty filter returns the
    /// full collection, identical to [`CompanyRepo::list`].
    pub async fn search(&self, filter: &CompanyFilter) -> DbResult<Vec<Company>> {
        let fragment = sql::company_where_clause(filter)?;
        let query = if fragment.is_empty() {
            format!("{SELECT} ORDER BY name")
        } else {
            format!("{SELECT} WHERE {} ORDER BY name", fragment.clause)
        };

        let client = self.pool.get().await?;
        let rows = client
            .query(query.as_str(), &fragment.params_ref())
            .await?;
        rows.iter().map(company_from_row).collect()
    }

    /// Fetch one company by handle.
    pub async fn get(&self, handle: &str) -> DbResult<Company> {
        let client = self.pool.get().await?;
        let query = format!("{SELECT} WHERE handle = $1");
        let row = client.query_opt(query.as_str(), &[&handle]).await?;

        match row {
            Some(row) => company_from_row(&row),
            None => Err(DbError::not_found(format!("No company: {handle}"))),
        }
    }

    /// Partially update a company; only the patch fields that are present
    /// are written.
    pub async fn update(&self, handle: &str, patch: &CompanyPatch) -> DbResult<Company> {
        let fields = UpdateFields::new()
            .maybe_set("name", patch.name.clone())
            .maybe_set("description", patch.description.clone())
            .maybe_set("numEmployees", patch.num_employees)
            .maybe_set("logoUrl", patch.logo_url.clone());
        let SqlFragment { clause, mut params } = sql::build_set_clause(fields, COLUMN_MAP)?;

        params.push(Arc::new(handle.to_string()));
        let query = format!(
            "UPDATE companies SET {clause} WHERE handle = ${}
             RETURNING handle, name, description, num_employees, logo_url",
            params.len()
        );

        let client = self.pool.get().await?;
        let row = client
            .query_opt(query.as_str(), &sql::params_ref(&params))
            .await?;

        match row {
            Some(row) => {
                debug!(handle, "updated company");
                company_from_row(&row)
            }
            None => Err(DbError::not_found(format!("No company: {handle}"))),
        }
    }

    /// Delete a company by handle.
    pub async fn delete(&self, handle: &str) -> DbResult<()> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "DELETE FROM companies WHERE handle = $1 RETURNING handle",
                &[&handle],
            )
            .await?;

        if row.is_none() {
            return Err(DbError::not_found(format!("No company: {handle}")));
        }
        debug!(handle, "deleted company");
        Ok(())
    }
}

fn company_from_row(row: &Row) -> DbResult<Company> {
    Ok(Company {
        handle: row.try_get("handle")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        num_employees: row.try_get("num_employees")?,
        logo_url: row.try_get("logo_url")?,
    })
}
