//! User repository.
//!
//! Passwords are bcrypt-hashed before storage; the hash is only ever read
//! back for verification and never crosses this module's boundary.

use std::sync::Arc;

use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;
use tokio_postgres::Row;
use tracing::{debug, info};

use hirelist_models::{AppliedJob, NewUser, User, UserDetail, UserPatch};

use crate::error::{DbError, DbResult};
use crate::sql::{self, SqlFragment, UpdateFields};

/// Logical field name -> column name for partial updates.
const COLUMN_MAP: &[(&str, &str)] = &[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
];

const SELECT: &str =
    "SELECT username, first_name, last_name, email, is_admin FROM users";

/// Repository for user rows and job applications.
#[derive(Clone)]
pub struct UserRepo {
    pool: Pool,
}

impl UserRepo {
    /// Create a new user repository.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Verify a username/password pair. Fails with
    /// [`DbError::InvalidCredentials`] for an unknown user or a wrong
    /// password, without distinguishing the two.
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<User> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT username, password, first_name, last_name, email, is_admin
                 FROM users WHERE username = $1",
                &[&username],
            )
            .await?;

        let Some(row) = row else {
            return Err(DbError::InvalidCredentials);
        };

        let hash: String = row.try_get("password")?;
        if !bcrypt::verify(password, &hash)? {
            return Err(DbError::InvalidCredentials);
        }

        user_from_row(&row)
    }

    /// Register a user, hashing the password with the given bcrypt cost.
    /// Fails with [`DbError::Duplicate`] when the username is taken.
    pub async fn register(&self, new: &NewUser, bcrypt_cost: u32) -> DbResult<User> {
        let client = self.pool.get().await?;

        let duplicate = client
            .query_opt("SELECT username FROM users WHERE username = $1", &[&new.username])
            .await?;
        if duplicate.is_some() {
            return Err(DbError::duplicate(format!(
                "Duplicate username: {}",
                new.username
            )));
        }

        let hashed = bcrypt::hash(&new.password, bcrypt_cost)?;
        let row = client
            .query_one(
                "INSERT INTO users (username, password, first_name, last_name, email, is_admin)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING username, first_name, last_name, email, is_admin",
                &[
                    &new.username,
                    &hashed,
                    &new.first_name,
                    &new.last_name,
                    &new.email,
                    &new.is_admin,
                ],
            )
            .await?;

        info!(username = %new.username, "registered user");
        user_from_row(&row)
    }

    /// List all users ordered by username.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let client = self.pool.get().await?;
        let query = format!("{SELECT} ORDER BY username");
        let rows = client.query(query.as_str(), &[]).await?;
        rows.iter().map(user_from_row).collect()
    }

    /// Fetch one user by username, together with the jobs they applied for.
    pub async fn get(&self, username: &str) -> DbResult<UserDetail> {
        let client = self.pool.get().await?;
        let query = format!("{SELECT} WHERE username = $1");
        let row = client.query_opt(query.as_str(), &[&username]).await?;

        let Some(row) = row else {
            return Err(DbError::not_found(format!("No user: {username}")));
        };

        let jobs = client
            .query(
                "SELECT jobs.id, jobs.title, jobs.company_handle
                 FROM applications
                 JOIN jobs ON applications.job_id = jobs.id
                 WHERE applications.username = $1
                 ORDER BY jobs.id",
                &[&username],
            )
            .await?
            .iter()
            .map(applied_job_from_row)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(UserDetail {
            user: user_from_row(&row)?,
            jobs,
        })
    }

    /// Partially update a user. A present password is re-hashed before
    /// being written.
    pub async fn update(
        &self,
        username: &str,
        patch: &UserPatch,
        bcrypt_cost: u32,
    ) -> DbResult<User> {
        let hashed = match &patch.password {
            Some(password) => Some(bcrypt::hash(password, bcrypt_cost)?),
            None => None,
        };

        let fields = UpdateFields::new()
            .maybe_set("firstName", patch.first_name.clone())
            .maybe_set("lastName", patch.last_name.clone())
            .maybe_set("password", hashed)
            .maybe_set("email", patch.email.clone())
            .maybe_set("isAdmin", patch.is_admin);
        let SqlFragment { clause, mut params } = sql::build_set_clause(fields, COLUMN_MAP)?;

        params.push(Arc::new(username.to_string()));
        let query = format!(
            "UPDATE users SET {clause} WHERE username = ${}
             RETURNING username, first_name, last_name, email, is_admin",
            params.len()
        );

        let client = self.pool.get().await?;
        let row = client
            .query_opt(query.as_str(), &sql::params_ref(&params))
            .await?;

        match row {
            Some(row) => {
                debug!(username, "updated user");
                user_from_row(&row)
            }
            None => Err(DbError::not_found(format!("No user: {username}"))),
        }
    }

    /// Delete a user by username.
    pub async fn delete(&self, username: &str) -> DbResult<()> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "DELETE FROM users WHERE username = $1 RETURNING username",
                &[&username],
            )
            .await?;

        if row.is_none() {
            return Err(DbError::not_found(format!("No user: {username}")));
        }
        debug!(username, "deleted user");
        Ok(())
    }

    /// Record a job application. Fails with [`DbError::NotFound`] when the
    /// user or job does not exist and [`DbError::Duplicate`] when the user
    /// already applied.
    pub async fn apply_for_job(&self, username: &str, job_id: i32) -> DbResult<()> {
        let client = self.pool.get().await?;

        let user = client
            .query_opt("SELECT username FROM users WHERE username = $1", &[&username])
            .await?;
        if user.is_none() {
            return Err(DbError::not_found(format!("No user: {username}")));
        }

        let job = client
            .query_opt("SELECT id FROM jobs WHERE id = $1", &[&job_id])
            .await?;
        if job.is_none() {
            return Err(DbError::not_found(format!("No job: {job_id}")));
        }

        client
            .execute(
                "INSERT INTO applications (username, job_id) VALUES ($1, $2)",
                &[&username, &job_id],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    DbError::duplicate(format!("{username} already applied to job {job_id}"))
                } else {
                    DbError::Query(e)
                }
            })?;

        info!(username, job_id, "recorded application");
        Ok(())
    }
}

fn user_from_row(row: &Row) -> DbResult<User> {
    Ok(User {
        username: row.try_get("username")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        is_admin: row.try_get("is_admin")?,
    })
}

fn applied_job_from_row(row: &Row) -> DbResult<AppliedJob> {
    Ok(AppliedJob {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        company_handle: row.try_get("company_handle")?,
    })
}
