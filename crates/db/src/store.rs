//! [`PgStore`]: the PostgreSQL implementation of the core repository ports.

use async_trait::async_trait;
use marketplace_core::ad::{Ad, AdInput, AdState};
use marketplace_core::error::CoreError;
use marketplace_core::feedback::Feedback;
use marketplace_core::ports::{
    AdRepository, DeleteOutcome, FeedbackRepository, ReservationRepository,
};
use marketplace_core::reservation::Reservation;
use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{AdRepo, FeedbackRepo, ReservationRepo};

/// Thin adapter delegating each port method to the matching `*Repo` call.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error in repository port");
    CoreError::Internal(format!("Storage error: {err}"))
}

#[async_trait]
impl AdRepository for PgStore {
    async fn list(&self) -> Result<Vec<Ad>, CoreError> {
        AdRepo::list(&self.pool).await.map_err(storage)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Ad>, CoreError> {
        AdRepo::find_by_id(&self.pool, id).await.map_err(storage)
    }

    async fn create(&self, input: &AdInput, state: AdState) -> Result<Ad, CoreError> {
        AdRepo::create(&self.pool, input, state).await.map_err(storage)
    }

    async fn update(&self, id: DbId, input: &AdInput) -> Result<Option<Ad>, CoreError> {
        AdRepo::update(&self.pool, id, input).await.map_err(storage)
    }

    async fn set_state(&self, id: DbId, state: AdState) -> Result<Option<Ad>, CoreError> {
        AdRepo::set_state(&self.pool, id, state).await.map_err(storage)
    }

    async fn delete_unreserved(&self, id: DbId) -> Result<DeleteOutcome, CoreError> {
        AdRepo::delete_unreserved(&self.pool, id).await.map_err(storage)
    }
}

#[async_trait]
impl ReservationRepository for PgStore {
    async fn list_by_ad(&self, ad_id: DbId) -> Result<Vec<Reservation>, CoreError> {
        ReservationRepo::list_by_ad(&self.pool, ad_id).await.map_err(storage)
    }
}

#[async_trait]
impl FeedbackRepository for PgStore {
    async fn list_by_ad(&self, ad_id: DbId) -> Result<Vec<Feedback>, CoreError> {
        FeedbackRepo::list_by_ad(&self.pool, ad_id).await.map_err(storage)
    }
}
