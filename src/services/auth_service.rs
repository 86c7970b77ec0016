//! Registration, login and bearer-token verification.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, Principal, User};
use crate::repositories::UserRepository;
use crate::utils::jwt::{issue_token, validate_token};
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }

    /// Self-service sign-up. Always creates a non-admin user.
    pub async fn register(&self, login: &str, password: &str) -> AppResult<User> {
        if login.trim().is_empty() {
            return Err(AppError::validation("login", "Login is required."));
        }
        if password.trim().is_empty() {
            return Err(AppError::validation("password", "Password is required."));
        }
        if self.users.login_taken(login, None).await? {
            return Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "login".to_string(),
                value: login.to_string(),
            });
        }

        let user = self
            .users
            .create(NewUser {
                login: login.to_string(),
                password_hash: hash_password(password)?,
                is_admin: false,
            })
            .await?;

        info!(user_id = user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// An unknown login and a wrong password produce the same 401 so the
    /// response does not reveal which logins exist.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<(User, String)> {
        let Some(user) = self.users.find_by_login(login).await? else {
            warn!(login = %login, "Login attempt for unknown user");
            return Err(AppError::Unauthorized {
                message: INVALID_CREDENTIALS.to_string(),
            });
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::Unauthorized {
                message: INVALID_CREDENTIALS.to_string(),
            });
        }

        let token = issue_token(&user, &self.jwt_config)?;
        info!(user_id = user.id, role = %user.role(), "User logged in");
        Ok((user, token))
    }

    /// Validates a bearer token and resolves the caller it names.
    pub fn principal_from_token(&self, token: &str) -> AppResult<Principal> {
        validate_token(token, &self.jwt_config)?.principal()
    }
}
