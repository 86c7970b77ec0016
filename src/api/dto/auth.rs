//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;
use crate::utils::validate::not_blank;

/// Register request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "not_blank", message = "Login is required."))]
    pub login: String,
    /// Plain text, hashed before storage
    #[validate(custom(function = "not_blank", message = "Password is required."))]
    pub password: String,
}

/// Login request payload. Not validated: any mismatch is a plain 401.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Successful login: the bearer token plus who it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i32,
    pub login: String,
    pub is_admin: bool,
}

impl LoginResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            token,
            user_id: user.id,
            login: user.login,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
