//! Parameterized SQL builders.
//!
//! Two small pure builders used by every repository:
//! - [`build_set_clause`] turns an ordered field list into the SET clause of
//!   a partial UPDATE, translating logical field names to column names.
//! - [`company_where_clause`] / [`job_where_clause`] turn optional search
//!   criteria into a WHERE clause.
//!
//! Both produce a [`SqlFragment`]: SQL text with `$1..$n` placeholders plus
//! the bind values in matching order. Values are never interpolated into the
//! SQL text.

use std::sync::Arc;

use tokio_postgres::types::ToSql;

use hirelist_models::{CompanyFilter, JobFilter};

use crate::error::{DbError, DbResult};

/// A bind value for a parameterized statement.
pub type SqlParam = Arc<dyn ToSql + Sync + Send>;

/// A clause fragment with positionally aligned bind values.
///
/// Invariant: the number of `$n` placeholders in `clause` equals
/// `params.len()`, and placeholder order matches param order.
#[derive(Debug, Default)]
pub struct SqlFragment {
    /// SQL text with `$1..$n` placeholders. Empty when no terms apply;
    /// callers must then omit the surrounding `WHERE`/`SET` keyword.
    pub clause: String,
    /// Bind values, one per placeholder, in placeholder order.
    pub params: Vec<SqlParam>,
}

impl SqlFragment {
    /// True when the fragment contributes no SQL.
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// Borrow the params in the form `tokio_postgres` execution expects.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        params_ref(&self.params)
    }

    /// Append one term, joining with ` AND ` when the clause is non-empty,
    /// and bind its value. The placeholder index is assigned sequentially,
    /// so `term` must reference it as `$n` via the passed closure.
    fn push_term(&mut self, term: impl FnOnce(usize) -> String, value: SqlParam) {
        if !self.clause.is_empty() {
            self.clause.push_str(" AND ");
        }
        self.clause.push_str(&term(self.params.len() + 1));
        self.params.push(value);
    }
}

/// Borrow a param slice in the form `tokio_postgres` execution expects.
///
/// Free function so repositories can append their own trailing params
/// (e.g. the row key of an UPDATE) before borrowing.
pub fn params_ref(params: &[SqlParam]) -> Vec<&(dyn ToSql + Sync)> {
    params
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect()
}

/// Ordered set of fields for a partial update.
///
/// Insertion order is preserved and determines placeholder positions; the
/// caller relies on this to append the row key as `$(n+1)`.
#[derive(Default)]
pub struct UpdateFields {
    fields: Vec<(&'static str, SqlParam)>,
}

impl UpdateFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field by logical name.
    pub fn set<T>(mut self, name: &'static str, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.fields.push((name, Arc::new(value)));
        self
    }

    /// Add a field only when the value is present. `None` leaves the field
    /// untouched by the update.
    pub fn maybe_set<T>(self, name: &'static str, value: Option<T>) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Build the SET clause of a partial UPDATE.
///
/// Each field becomes one `"column"=$n` term in insertion order, with the
/// logical name translated through `column_map` (identity when absent).
/// Fails with a validation error when `fields` is empty.
///
/// The fragment is never executed standalone; the caller embeds it as
/// `UPDATE ... SET <clause> WHERE <key> = $(n+1)` and appends the key value.
pub fn build_set_clause(
    fields: UpdateFields,
    column_map: &[(&str, &str)],
) -> DbResult<SqlFragment> {
    if fields.is_empty() {
        return Err(DbError::validation("no data to update"));
    }

    let mut terms = Vec::with_capacity(fields.len());
    let mut params = Vec::with_capacity(fields.len());

    for (idx, (name, value)) in fields.fields.into_iter().enumerate() {
        let column = column_map
            .iter()
            .find(|(logical, _)| *logical == name)
            .map_or(name, |(_, physical)| *physical);
        terms.push(format!("\"{}\"=${}", column, idx + 1));
        params.push(value);
    }

    Ok(SqlFragment {
        clause: terms.join(", "),
        params,
    })
}

/// Build the WHERE clause for a company search.
///
/// Term order is fixed: name substring match (case-insensitive, value
/// lower-cased before binding), then the minimum and maximum employee
/// bounds. Placeholders are assigned sequentially as terms are appended.
/// An empty filter yields an empty fragment.
pub fn company_where_clause(filter: &CompanyFilter) -> DbResult<SqlFragment> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        if min > max {
            return Err(DbError::validation(
                "minEmployees must not exceed maxEmployees",
            ));
        }
    }

    let mut fragment = SqlFragment::default();

    if let Some(name) = &filter.name {
        fragment.push_term(
            |n| format!("LOWER(name) LIKE '%' || ${} || '%'", n),
            Arc::new(name.to_lowercase()),
        );
    }
    if let Some(min) = filter.min_employees {
        fragment.push_term(|n| format!("num_employees >= ${}", n), Arc::new(min));
    }
    if let Some(max) = filter.max_employees {
        fragment.push_term(|n| format!("num_employees <= ${}", n), Arc::new(max));
    }

    Ok(fragment)
}

/// Build the WHERE clause for a job search.
///
/// Term order is fixed: title substring match (case-insensitive), then the
/// salary and equity minimums. No cross-field validation applies.
pub fn job_where_clause(filter: &JobFilter) -> DbResult<SqlFragment> {
    let mut fragment = SqlFragment::default();

    if let Some(title) = &filter.title {
        fragment.push_term(
            |n| format!("title ILIKE '%' || ${} || '%'", n),
            Arc::new(title.to_lowercase()),
        );
    }
    if let Some(salary) = filter.min_salary {
        fragment.push_term(|n| format!("salary >= ${}", n), Arc::new(salary));
    }
    if let Some(equity) = filter.min_equity {
        fragment.push_term(|n| format!("equity >= ${}", n), Arc::new(equity));
    }

    Ok(fragment)
}
