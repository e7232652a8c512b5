//! Feedback row model.

use marketplace_core::feedback::Feedback;
use marketplace_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackRow {
    pub id: DbId,
    pub ad_id: DbId,
    pub user_id: String,
    pub rating: i16,
    pub comment: String,
    pub date: Timestamp,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Feedback {
            id: row.id,
            ad_id: row.ad_id,
            user_id: row.user_id,
            rating: row.rating,
            comment: row.comment,
            date: row.date,
        }
    }
}
