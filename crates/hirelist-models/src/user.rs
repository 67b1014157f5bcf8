//! User models.
//!
//! The hashed password never leaves the database layer: `User` has no
//! password field, and repositories only select it for verification.

use serde::{Deserialize, Serialize};

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// A user together with the jobs they applied for.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub jobs: Vec<AppliedJob>,
}

/// A job entry in a user's application list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJob {
    pub id: i32,
    pub title: String,
    pub company_handle: String,
}

/// Payload for registering a user. `password` is plaintext here and is
/// hashed before storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial update for a user. A present `password` is re-hashed by the
/// repository before being written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl UserPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.is_admin.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_detail_flattens_user_fields() {
        let detail = UserDetail {
            user: User {
                username: "u1".to_string(),
                first_name: "U".to_string(),
                last_name: "One".to_string(),
                email: "u1@test.dev".to_string(),
                is_admin: false,
            },
            jobs: vec![AppliedJob {
                id: 3,
                title: "Engineer".to_string(),
                company_handle: "acme".to_string(),
            }],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["username"], "u1");
        assert_eq!(json["firstName"], "U");
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["jobs"][0]["companyHandle"], "acme");
    }

    #[test]
    fn new_user_defaults_to_non_admin() {
        let new: NewUser = serde_json::from_str(
            r#"{"username": "u1", "password": "pw", "firstName": "U",
                "lastName": "One", "email": "u1@test.dev"}"#,
        )
        .unwrap();
        assert!(!new.is_admin);
    }

    #[test]
    fn patch_deserializes_with_missing_fields() {
        let patch: UserPatch = serde_json::from_str(r#"{"firstName": "New"}"#).unwrap();
        assert_eq!(patch.first_name.as_deref(), Some("New"));
        assert!(!patch.is_empty());

        let empty: UserPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
