//! Repository for the `feedback` table.

use marketplace_core::feedback::{Feedback, FeedbackInput};
use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::FeedbackRow;

const COLUMNS: &str = "id, ad_id, user_id, rating, comment, date";

/// Provides CRUD operations for feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert feedback for an existing ad. Returns `None` if the ad does not exist.
    pub async fn create(
        pool: &PgPool,
        input: &FeedbackInput,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (ad_id, user_id, rating, comment, date)
             SELECT $1, $2, $3, $4, COALESCE($5, NOW())
             WHERE EXISTS (SELECT 1 FROM ads WHERE id = $1)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FeedbackRow>(&query)
            .bind(input.ad_id)
            .bind(&input.user_id)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.date)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback WHERE id = $1");
        let row = sqlx::query_as::<_, FeedbackRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// List feedback for an ad, oldest first.
    pub async fn list_by_ad(pool: &PgPool, ad_id: DbId) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback WHERE ad_id = $1 ORDER BY date, id");
        let rows = sqlx::query_as::<_, FeedbackRow>(&query)
            .bind(ad_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replace a feedback entry. Returns `None` if it or the ad does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &FeedbackInput,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "UPDATE feedback SET
                ad_id = $2,
                user_id = $3,
                rating = $4,
                comment = $5,
                date = COALESCE($6, date)
             WHERE id = $1 AND EXISTS (SELECT 1 FROM ads WHERE id = $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FeedbackRow>(&query)
            .bind(id)
            .bind(input.ad_id)
            .bind(&input.user_id)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.date)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Permanently delete a feedback entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
