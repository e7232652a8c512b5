//! Repository for the `reservations` table.

use marketplace_core::reservation::{Reservation, ReservationInput, ReservationStatus};
use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::reservation::ReservationRow;

const COLUMNS: &str = "id, ad_id, user_id, begin_date, end_date, status_id, created_at";

/// Provides CRUD operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a reservation for an existing ad.
    ///
    /// Returns `None` if the ad does not exist.
    pub async fn create(
        pool: &PgPool,
        input: &ReservationInput,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let created = Self::create_inner(&mut tx, input).await?;
        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        let row = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// List reservations for an ad ordered by start date.
    pub async fn list_by_ad(pool: &PgPool, ad_id: DbId) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations WHERE ad_id = $1 ORDER BY begin_date, id"
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(ad_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_status(
        pool: &PgPool,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE status_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(status.id())
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replace a reservation's fields.
    ///
    /// Returns `None` if the reservation or the referenced ad does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ReservationInput,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let updated = Self::update_inner(&mut tx, id, input).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Mark a reservation cancelled. Cancelling twice is harmless.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(id)
            .bind(ReservationStatus::Cancelled.id())
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Permanently delete a reservation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Transaction-scoped writes
    // -----------------------------------------------------------------------
    //
    // Every write that can leave an active reservation behind takes
    // `FOR SHARE` on the ad row first. `AdRepo::delete_unreserved` holds
    // `FOR UPDATE` on that row, so the write either commits before the
    // delete checks for active reservations or finds the ad already gone.

    /// Insert within an existing transaction. The caller commits.
    pub async fn create_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &ReservationInput,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        if !lock_ad(tx, input.ad_id).await? {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO reservations (ad_id, user_id, begin_date, end_date, status_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(input.ad_id)
            .bind(&input.user_id)
            .bind(input.begin_date)
            .bind(input.end_date)
            .bind(input.status_or_default().id())
            .fetch_one(&mut **tx)
            .await?;
        Ok(Some(row.into()))
    }

    /// Replace within an existing transaction. The caller commits.
    pub async fn update_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        input: &ReservationInput,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        if !lock_ad(tx, input.ad_id).await? {
            return Ok(None);
        }

        let query = format!(
            "UPDATE reservations SET
                ad_id = $2,
                user_id = $3,
                begin_date = $4,
                end_date = $5,
                status_id = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(id)
            .bind(input.ad_id)
            .bind(&input.user_id)
            .bind(input.begin_date)
            .bind(input.end_date)
            .bind(input.status_or_default().id())
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(Into::into))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Share-lock the ad row until the transaction ends. `false` if it is missing.
async fn lock_ad(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ad_id: DbId,
) -> Result<bool, sqlx::Error> {
    let ad: Option<(DbId,)> = sqlx::query_as("SELECT id FROM ads WHERE id = $1 FOR SHARE")
        .bind(ad_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(ad.is_some())
}
