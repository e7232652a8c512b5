//! Reservation row model.

use marketplace_core::reservation::{Reservation, ReservationStatus};
use marketplace_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: DbId,
    pub ad_id: DbId,
    pub user_id: String,
    pub begin_date: Timestamp,
    pub end_date: Timestamp,
    #[sqlx(rename = "status_id", try_from = "i16")]
    pub status: ReservationStatus,
    pub created_at: Timestamp,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            ad_id: row.ad_id,
            user_id: row.user_id,
            begin_date: row.begin_date,
            end_date: row.end_date,
            status: row.status,
        }
    }
}
