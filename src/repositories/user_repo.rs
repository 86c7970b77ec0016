//! User repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::lower;
use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewUser, UpdateUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError>;

    /// Exact, case-sensitive match as used by login.
    async fn find_by_login(&self, user_login: &str) -> Result<Option<User>, AppError>;

    /// Case-insensitive existence check, optionally ignoring one user.
    async fn login_taken(&self, user_login: &str, except: Option<i32>) -> Result<bool, AppError>;

    async fn list_all(&self) -> Result<Vec<User>, AppError>;

    async fn update(&self, user_id: i32, update_data: UpdateUser) -> Result<User, AppError>;

    /// Returns whether a row was removed. The user's reviews cascade.
    async fn delete(&self, user_id: i32) -> Result<bool, AppError>;
}

/// PostgreSQL user repository.
///
/// `AsyncDbPool` is reference counted, so cloning is cheap.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
}

impl PgUserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_login(&self, user_login: &str) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(login.eq(user_login))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn login_taken(&self, user_login: &str, except: Option<i32>) -> Result<bool, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let mut query = users
            .select(id)
            .filter(lower(login).eq(user_login.to_lowercase()))
            .into_boxed();
        if let Some(except_id) = except {
            query = query.filter(id.ne(except_id));
        }

        query
            .first::<i32>(&mut conn)
            .await
            .optional()
            .map(|found| found.is_some())
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .select(User::as_select())
            .order(id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, user_id: i32, update_data: UpdateUser) -> Result<User, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        if update_data.is_empty() {
            return users
                .find(user_id)
                .select(User::as_select())
                .first(&mut conn)
                .await
                .map_err(AppError::from);
        }

        diesel::update(users.filter(id.eq(user_id)))
            .set(&update_data)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, user_id: i32) -> Result<bool, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(users.filter(id.eq(user_id)))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(AppError::from)
    }
}
