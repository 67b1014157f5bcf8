//! Job models.

use serde::{Deserialize, Serialize};

/// A job posting as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// Payload for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// Partial update for a job. The id and company handle cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<f64>,
}

impl JobPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.equity.is_none()
    }
}

/// Search criteria for jobs. Every field is optional; a present field
/// contributes one WHERE term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// Case-insensitive substring match on the job title.
    pub title: Option<String>,
    /// Minimum salary threshold.
    pub min_salary: Option<i32>,
    /// Minimum equity threshold.
    pub min_equity: Option<f64>,
}

impl JobFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.min_equity.is_none()
    }
}
