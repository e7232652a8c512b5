//! User row model.

use marketplace_core::types::{DbId, Timestamp};
use marketplace_core::user::User;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub uid: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role_id: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            uid: row.uid,
            firstname: row.firstname,
            lastname: row.lastname,
            email: row.email,
            role_id: row.role_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
