//! Repository for the `ads` table.

use marketplace_core::ad::{Ad, AdInput, AdState};
use marketplace_core::ports::DeleteOutcome;
use marketplace_core::reservation::ReservationStatus;
use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::ad::AdRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, hour_price, latitude, longitude, \
                       state_id, image, created_at, updated_at";

/// Provides CRUD operations for ads.
pub struct AdRepo;

impl AdRepo {
    /// Insert a new ad in the given state, returning the created row.
    pub async fn create(pool: &PgPool, input: &AdInput, state: AdState) -> Result<Ad, sqlx::Error> {
        let query = format!(
            "INSERT INTO ads (user_id, name, description, hour_price, latitude, longitude, state_id, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdRow>(&query)
            .bind(&input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.hour_price)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(state.id())
            .bind(&input.image)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads WHERE id = $1");
        let row = sqlx::query_as::<_, AdRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// List all ads in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads ORDER BY id");
        let rows = sqlx::query_as::<_, AdRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Overwrite the mutable fields of an ad. The state column is untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AdInput,
    ) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!(
            "UPDATE ads SET
                user_id = $2,
                name = $3,
                description = $4,
                hour_price = $5,
                latitude = $6,
                longitude = $7,
                image = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdRow>(&query)
            .bind(id)
            .bind(&input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.hour_price)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.image)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Set the publication state. Returns `None` if the ad does not exist.
    pub async fn set_state(
        pool: &PgPool,
        id: DbId,
        state: AdState,
    ) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!(
            "UPDATE ads SET state_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdRow>(&query)
            .bind(id)
            .bind(state.id())
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Delete an ad unless an active reservation references it.
    ///
    /// Runs in one transaction holding a `FOR UPDATE` lock on the ad row.
    /// Reservation inserts and updates take `FOR SHARE` on the same row, so
    /// they either commit before this check sees them or wait until the ad
    /// is gone.
    /// Feedback and cancelled reservations are removed by `ON DELETE CASCADE`.
    pub async fn delete_unreserved(pool: &PgPool, id: DbId) -> Result<DeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as("SELECT id FROM ads WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let (reserved,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM reservations WHERE ad_id = $1 AND status_id = $2)",
        )
        .bind(id)
        .bind(ReservationStatus::Active.id())
        .fetch_one(&mut *tx)
        .await?;
        if reserved {
            return Ok(DeleteOutcome::Reserved);
        }

        sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
