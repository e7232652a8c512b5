//! Repository for the `users` table. Users are addressed by `uid`.

use marketplace_core::user::{User, UserInput};
use sqlx::PgPool;

use crate::models::user::UserRow;

const COLUMNS: &str = "id, uid, firstname, lastname, email, role_id, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user. A duplicate `uid` violates `uq_users_uid`.
    pub async fn create(pool: &PgPool, input: &UserInput) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (uid, firstname, lastname, email, role_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.uid)
            .bind(&input.firstname)
            .bind(&input.lastname)
            .bind(&input.email)
            .bind(input.role_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_uid(pool: &PgPool, uid: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE uid = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(uid)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Replace a user's profile fields. The uid itself never changes.
    ///
    /// Returns `None` if no user has that uid.
    pub async fn update_by_uid(
        pool: &PgPool,
        uid: &str,
        input: &UserInput,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                firstname = $2,
                lastname = $3,
                email = $4,
                role_id = $5,
                updated_at = NOW()
             WHERE uid = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(uid)
            .bind(&input.firstname)
            .bind(&input.lastname)
            .bind(&input.email)
            .bind(input.role_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Permanently delete a user. Returns `true` if a row was removed.
    pub async fn delete_by_uid(pool: &PgPool, uid: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE uid = $1")
            .bind(uid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
