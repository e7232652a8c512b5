//! Repository ports consumed by the search engine and lifecycle guard.
//!
//! The `db` crate implements these over PostgreSQL. Errors surface as
//! [`CoreError`]; storage failures map to `CoreError::Internal`.

use async_trait::async_trait;

use crate::ad::{Ad, AdInput, AdState};
use crate::error::CoreError;
use crate::feedback::Feedback;
use crate::reservation::Reservation;
use crate::types::DbId;

/// Result of an atomic guarded delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// At least one active reservation exists; the ad was left untouched.
    Reserved,
}

#[async_trait]
pub trait AdRepository: Send + Sync {
    /// All ads in natural enumeration order (ascending id).
    async fn list(&self) -> Result<Vec<Ad>, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Ad>, CoreError>;

    /// Insert an already-validated ad in the given state.
    async fn create(&self, input: &AdInput, state: AdState) -> Result<Ad, CoreError>;

    /// Overwrite mutable fields. Returns `None` if no such ad exists.
    async fn update(&self, id: DbId, input: &AdInput) -> Result<Option<Ad>, CoreError>;

    /// Returns `None` if no such ad exists.
    async fn set_state(&self, id: DbId, state: AdState) -> Result<Option<Ad>, CoreError>;

    /// Delete the ad unless an active reservation references it.
    ///
    /// Implementations must perform the reservation check and the delete as
    /// one unit so that a concurrently created reservation is detected.
    async fn delete_unreserved(&self, id: DbId) -> Result<DeleteOutcome, CoreError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn list_by_ad(&self, ad_id: DbId) -> Result<Vec<Reservation>, CoreError>;
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn list_by_ad(&self, ad_id: DbId) -> Result<Vec<Feedback>, CoreError>;
}
