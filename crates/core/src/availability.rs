//! Date-range availability of an ad.

use std::sync::Arc;

use crate::error::CoreError;
use crate::ports::ReservationRepository;
use crate::reservation::{Reservation, TimeWindow};
use crate::types::DbId;

/// `true` when no active reservation overlaps `window`.
///
/// Cancelled reservations are ignored. An empty window is always free.
pub fn window_is_free(reservations: &[Reservation], window: &TimeWindow) -> bool {
    !reservations
        .iter()
        .filter(|r| r.is_active())
        .any(|r| r.window().overlaps(window))
}

/// Answers availability questions by reading an ad's reservations.
#[derive(Clone)]
pub struct AvailabilityFilter {
    reservations: Arc<dyn ReservationRepository>,
}

impl AvailabilityFilter {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn is_available(&self, ad_id: DbId, window: &TimeWindow) -> Result<bool, CoreError> {
        let reservations = self.reservations.list_by_ad(ad_id).await?;
        let free = window_is_free(&reservations, window);
        tracing::trace!(ad_id, reservations = reservations.len(), free, "Checked availability");
        Ok(free)
    }

    /// Whether any reservation on the ad is still active.
    pub async fn has_active_reservation(&self, ad_id: DbId) -> Result<bool, CoreError> {
        let reservations = self.reservations.list_by_ad(ad_id).await?;
        Ok(reservations.iter().any(Reservation::is_active))
    }
}
