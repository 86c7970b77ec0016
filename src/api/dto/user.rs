//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;
use crate::services::{UserDraft, UserEdit};
use crate::utils::validate::not_blank;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for an administrator creating a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank", message = "Login is required."))]
    pub login: String,
    #[validate(custom(function = "not_blank", message = "Password is required."))]
    pub password: String,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl CreateUserRequest {
    pub fn into_draft(self) -> UserDraft {
        UserDraft {
            login: self.login,
            password: self.password,
            is_admin: self.is_admin.unwrap_or(false),
        }
    }
}

/// Request body for updating a user. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user_id: Option<i32>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    pub fn into_edit(self) -> UserEdit {
        UserEdit {
            user_id: self.user_id,
            login: self.login,
            password: self.password,
            is_admin: self.is_admin,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for user data (excludes the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i32,
    pub login: String,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            login: user.login,
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_defaults_to_non_admin() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"login":"bob","password":"pw"}"#).unwrap();
        assert!(!request.into_draft().is_admin);
    }

    #[test]
    fn test_update_user_accepts_empty_body() {
        let request: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        let edit = request.into_edit();
        assert!(edit.user_id.is_none());
        assert!(edit.login.is_none());
        assert!(edit.is_admin.is_none());
    }
}
