//! Reservation entity, status codes and time-window arithmetic.
//!
//! Status IDs match the `reservation_statuses` seed data.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp, UserId};

/// Reservation status as stored in `reservations.status_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

impl ReservationStatus {
    pub fn id(self) -> i16 {
        match self {
            ReservationStatus::Active => 1,
            ReservationStatus::Cancelled => 2,
        }
    }

    pub fn from_id(id: i16) -> Result<Self, CoreError> {
        match id {
            1 => Ok(ReservationStatus::Active),
            2 => Ok(ReservationStatus::Cancelled),
            other => Err(CoreError::Internal(format!(
                "Unknown reservation status id {other}"
            ))),
        }
    }
}

impl TryFrom<i16> for ReservationStatus {
    type Error = CoreError;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        ReservationStatus::from_id(id)
    }
}

/// A user's claim on an ad for a bounded interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: DbId,
    pub ad_id: DbId,
    pub user_id: UserId,
    pub begin_date: Timestamp,
    pub end_date: Timestamp,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Active reservations block availability and ad deletion.
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            begin: self.begin_date,
            end: self.end_date,
        }
    }
}

/// Half-open interval `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub begin: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    /// Build a window, rejecting `end < begin`. Zero-length windows are allowed.
    pub fn new(begin: Timestamp, end: Timestamp) -> Result<Self, CoreError> {
        if end < begin {
            return Err(CoreError::Validation(format!(
                "end_date ({end}) must not be before begin_date ({begin})"
            )));
        }
        Ok(Self { begin, end })
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Standard half-open overlap test. An empty window overlaps nothing.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.begin < other.end && self.end > other.begin
    }
}

/// Validate the dates of a reservation being created or updated.
pub fn validate_reservation_dates(begin: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end <= begin {
        return Err(CoreError::Validation(
            "end_date must be after begin_date".to_string(),
        ));
    }
    Ok(())
}

/// Fields a client supplies when creating or replacing a reservation.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationInput {
    pub ad_id: DbId,
    pub user_id: UserId,
    pub begin_date: Timestamp,
    pub end_date: Timestamp,
    /// Defaults to `active` if omitted.
    pub status: Option<ReservationStatus>,
}

impl ReservationInput {
    pub fn check(&self) -> Result<(), CoreError> {
        if self.user_id.is_empty() {
            return Err(CoreError::Validation("user_id: must not be empty".to_string()));
        }
        validate_reservation_dates(self.begin_date, self.end_date)
    }

    pub fn status_or_default(&self) -> ReservationStatus {
        self.status.unwrap_or(ReservationStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(day: u32, hour: u32, min: u32, sec: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 9, day, hour, min, sec).unwrap()
    }

    fn window(begin: Timestamp, end: Timestamp) -> TimeWindow {
        TimeWindow::new(begin, end).unwrap()
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        let a = window(at(19, 9, 0, 0), at(19, 10, 0, 0));
        let b = window(at(19, 19, 42, 13), at(20, 19, 42, 13));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partially_covering_windows_overlap() {
        let a = window(at(20, 9, 0, 0), at(21, 10, 0, 0));
        let b = window(at(19, 19, 42, 13), at(20, 19, 42, 13));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let a = window(at(19, 9, 0, 0), at(19, 10, 0, 0));
        let b = window(at(19, 10, 0, 0), at(19, 11, 0, 0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn contained_window_overlaps() {
        let outer = window(at(19, 0, 0, 0), at(21, 0, 0, 0));
        let inner = window(at(20, 9, 0, 0), at(20, 10, 0, 0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn empty_window_never_overlaps() {
        let point = window(at(20, 9, 0, 0), at(20, 9, 0, 0));
        let covering = window(at(19, 0, 0, 0), at(21, 0, 0, 0));
        assert!(point.is_empty());
        assert!(!point.overlaps(&covering));
        assert!(!covering.overlaps(&point));
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert_matches!(
            TimeWindow::new(at(20, 0, 0, 0), at(19, 0, 0, 0)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn reservation_dates_must_be_strictly_ordered() {
        assert!(validate_reservation_dates(at(19, 0, 0, 0), at(20, 0, 0, 0)).is_ok());
        assert!(validate_reservation_dates(at(19, 0, 0, 0), at(19, 0, 0, 0)).is_err());
        assert!(validate_reservation_dates(at(20, 0, 0, 0), at(19, 0, 0, 0)).is_err());
    }

    #[test]
    fn reservation_input_defaults_to_active() {
        let input = ReservationInput {
            ad_id: 1,
            user_id: "Testeur".into(),
            begin_date: at(19, 19, 42, 13),
            end_date: at(20, 19, 42, 13),
            status: None,
        };
        assert!(input.check().is_ok());
        assert_eq!(input.status_or_default(), ReservationStatus::Active);

        let inverted = ReservationInput {
            begin_date: input.end_date,
            end_date: input.begin_date,
            ..input
        };
        assert_matches!(inverted.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(ReservationStatus::Active.id(), 1);
        assert_eq!(ReservationStatus::Cancelled.id(), 2);
        assert_eq!(ReservationStatus::from_id(2).unwrap(), ReservationStatus::Cancelled);
        assert_matches!(ReservationStatus::from_id(0), Err(CoreError::Internal(_)));
    }
}
