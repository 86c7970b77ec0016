use diesel::prelude::*;

use super::Role;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub login: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }
}

/// NewUser model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// UpdateUser model for partial updates
/// Derives AsChangeset for UPDATE operations with optional fields
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub login: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}

impl UpdateUser {
    /// Diesel rejects an UPDATE with no columns, so callers skip the query in that case.
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.password_hash.is_none() && self.is_admin.is_none()
    }
}
