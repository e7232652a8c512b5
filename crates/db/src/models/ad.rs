//! Ad row model.

use marketplace_core::ad::{Ad, AdState};
use marketplace_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `ads` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdRow {
    pub id: DbId,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub hour_price: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[sqlx(rename = "state_id", try_from = "i16")]
    pub state: AdState,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AdRow> for Ad {
    fn from(row: AdRow) -> Self {
        Ad {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            hour_price: row.hour_price,
            latitude: row.latitude,
            longitude: row.longitude,
            state: row.state,
            image: row.image,
        }
    }
}
