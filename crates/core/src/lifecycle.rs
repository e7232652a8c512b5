//! Guarded ad mutations: create, publish, unpublish, update and delete.
//!
//! All input validation happens before the first repository call, so a
//! rejected request never leaves partial state behind.

use std::sync::Arc;

use crate::ad::{Ad, AdInput, AdState};
use crate::availability::AvailabilityFilter;
use crate::error::CoreError;
use crate::ports::{AdRepository, DeleteOutcome, ReservationRepository};
use crate::types::DbId;

const ENTITY: &str = "Ad";

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

fn reserved(id: DbId) -> CoreError {
    CoreError::Conflict(format!("Ad {id} has an active reservation and cannot be deleted"))
}

#[derive(Clone)]
pub struct AdLifecycleGuard {
    ads: Arc<dyn AdRepository>,
    availability: AvailabilityFilter,
}

impl AdLifecycleGuard {
    pub fn new(ads: Arc<dyn AdRepository>, reservations: Arc<dyn ReservationRepository>) -> Self {
        Self {
            ads,
            availability: AvailabilityFilter::new(reservations),
        }
    }

    pub async fn get(&self, id: DbId) -> Result<Ad, CoreError> {
        self.ads.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validate and insert a new ad. It starts as `Draft` unless the input
    /// asks for immediate publication.
    pub async fn create(&self, input: &AdInput) -> Result<Ad, CoreError> {
        input.check()?;
        let state = input.initial_state()?;
        let ad = self.ads.create(input, state).await?;
        tracing::info!(ad_id = ad.id, state = ?ad.state, "Ad created");
        Ok(ad)
    }

    pub async fn publish(&self, id: DbId) -> Result<Ad, CoreError> {
        self.transition(id, AdState::Published).await
    }

    pub async fn unpublish(&self, id: DbId) -> Result<Ad, CoreError> {
        self.transition(id, AdState::Unpublished).await
    }

    async fn transition(&self, id: DbId, to: AdState) -> Result<Ad, CoreError> {
        let current = self.get(id).await?;
        let next = current.state.transition(to)?;
        if next == current.state {
            tracing::debug!(ad_id = id, state = ?next, "Ad already in requested state");
            return Ok(current);
        }
        let ad = self
            .ads
            .set_state(id, next)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(ad_id = id, from = ?current.state, to = ?next, "Ad state changed");
        Ok(ad)
    }

    /// Overwrite an ad's mutable fields. The publication state is kept.
    pub async fn update(&self, id: DbId, input: &AdInput) -> Result<Ad, CoreError> {
        input.check()?;
        let ad = self
            .ads
            .update(id, input)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(ad_id = id, "Ad updated");
        Ok(ad)
    }

    /// Delete an ad that has no active reservation.
    ///
    /// The repository re-checks reservations atomically with the delete, so
    /// a reservation created after the first check still blocks it.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.get(id).await?;
        if self.availability.has_active_reservation(id).await? {
            tracing::info!(ad_id = id, "Delete refused: active reservation");
            return Err(reserved(id));
        }
        match self.ads.delete_unreserved(id).await? {
            DeleteOutcome::Deleted => {
                tracing::info!(ad_id = id, "Ad deleted");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(not_found(id)),
            DeleteOutcome::Reserved => {
                tracing::info!(ad_id = id, "Delete refused: reservation appeared concurrently");
                Err(reserved(id))
            }
        }
    }
}
