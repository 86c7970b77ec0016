//! User service for business logic operations.
//!
//! Provides a higher-level API for user operations, encapsulating
//! business rules and coordinating with the repository layer.

use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, Principal, UpdateUser, User};
use crate::repositories::UserRepository;
use crate::utils::password::hash_password;
use crate::utils::validate::non_blank;

/// Input for an administrator creating a user.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub login: String,
    pub password: String,
    pub is_admin: bool,
}

/// Partial user update. Blank strings are ignored.
#[derive(Debug, Clone, Default)]
pub struct UserEdit {
    /// Must match the path id when present.
    pub user_id: Option<i32>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    fn duplicate_login(login: &str) -> AppError {
        AppError::Duplicate {
            entity: "user".to_string(),
            field: "login".to_string(),
            value: login.to_string(),
        }
    }

    /// Creates a user with an explicit admin flag.
    ///
    /// # Returns
    /// The stored user, or `Duplicate` when the login is taken in any casing
    pub async fn create_user(&self, draft: UserDraft) -> AppResult<User> {
        if draft.login.trim().is_empty() {
            return Err(AppError::validation("login", "Login is required."));
        }
        if draft.password.trim().is_empty() {
            return Err(AppError::validation("password", "Password is required."));
        }
        if self.repo.login_taken(&draft.login, None).await? {
            return Err(Self::duplicate_login(&draft.login));
        }

        let user = self
            .repo
            .create(NewUser {
                login: draft.login,
                password_hash: hash_password(&draft.password)?,
                is_admin: draft.is_admin,
            })
            .await?;

        info!(user_id = user.id, is_admin = user.is_admin, "User created");
        Ok(user)
    }

    /// Gets a user by their ID.
    ///
    /// # Returns
    /// The user if found, or `NotFound` error
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list_all().await
    }

    /// Applies a partial update on behalf of `principal`.
    ///
    /// Checks run in a fixed order: existence (404), ownership (403),
    /// body id (400). Only administrators may touch the admin flag.
    pub async fn update_user(&self, principal: &Principal, id: i32, edit: UserEdit) -> AppResult<User> {
        let current = self.get_user(id).await?;
        principal.require_owner_or_admin(current.id, "update this user")?;

        if edit.user_id.is_some_and(|body_id| body_id != id) {
            return Err(AppError::bad_request("User ID mismatch."));
        }

        let mut changes = UpdateUser::default();

        if let Some(is_admin) = edit.is_admin.filter(|flag| *flag != current.is_admin) {
            if !principal.is_admin() {
                return Err(AppError::Forbidden {
                    message: "Only administrators can change the admin flag".to_string(),
                });
            }
            changes.is_admin = Some(is_admin);
        }

        if let Some(login) = non_blank(edit.login).filter(|login| *login != current.login) {
            if self.repo.login_taken(&login, Some(id)).await? {
                return Err(Self::duplicate_login(&login));
            }
            changes.login = Some(login);
        }

        if let Some(password) = non_blank(edit.password) {
            changes.password_hash = Some(hash_password(&password)?);
        }

        let user = self.repo.update(id, changes).await?;
        info!(user_id = user.id, actor_id = principal.user_id, "User updated");
        Ok(user)
    }

    /// Deletes a user together with the reviews they wrote.
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("user", "id", id));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
