//! Company models.

use serde::{Deserialize, Serialize};

/// A company row as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// URL-safe unique handle, e.g. `acme-corp`.
    pub handle: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_employees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Payload for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Partial update for a company. Only the fields that are `Some` are written.
/// The handle is the row key and cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.num_employees.is_none()
            && self.logo_url.is_none()
    }
}

/// Search criteria for companies. Every field is optional; a present field
/// contributes one WHERE term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the company name.
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.min_employees.is_none() && self.max_employees.is_none()
    }
}
