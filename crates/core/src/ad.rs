//! Ad entity, validated input and publication state machine.
//!
//! State IDs match the `ad_states` seed data (1-based SMALLSERIAL).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, UserId};

// ---------------------------------------------------------------------------
// Publication state
// ---------------------------------------------------------------------------

/// Visibility of an ad in search and its bookability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdState {
    /// Initial state at creation. Never a transition target.
    Draft,
    Published,
    /// Withdrawn from search. Distinct from `Draft`.
    Unpublished,
}

impl AdState {
    /// Database state ID.
    pub fn id(self) -> i16 {
        match self {
            AdState::Draft => 1,
            AdState::Published => 2,
            AdState::Unpublished => 3,
        }
    }

    /// Map a database state ID back to a state.
    pub fn from_id(id: i16) -> Result<Self, CoreError> {
        match id {
            1 => Ok(AdState::Draft),
            2 => Ok(AdState::Published),
            3 => Ok(AdState::Unpublished),
            other => Err(CoreError::Internal(format!("Unknown ad state id {other}"))),
        }
    }

    /// Returns the set of states reachable from `self`.
    ///
    /// Re-entering the current state is listed so that re-publish and
    /// re-unpublish are idempotent.
    pub fn valid_transitions(self) -> &'static [AdState] {
        match self {
            AdState::Draft => &[AdState::Published, AdState::Unpublished],
            AdState::Published => &[AdState::Published, AdState::Unpublished],
            AdState::Unpublished => &[AdState::Published, AdState::Unpublished],
        }
    }

    pub fn can_transition(self, to: AdState) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a state transition, returning a conflict for invalid ones.
    pub fn transition(self, to: AdState) -> Result<AdState, CoreError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(CoreError::Conflict(format!(
                "Invalid ad state transition: {self:?} -> {to:?}"
            )))
        }
    }
}

impl TryFrom<i16> for AdState {
    type Error = CoreError;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        AdState::from_id(id)
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A listed, reservable offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: DbId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub hour_price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub state: AdState,
    pub image: String,
}

impl Ad {
    pub fn is_published(&self) -> bool {
        self.state == AdState::Published
    }
}

/// Mutable ad fields, shared by create and update.
///
/// `publish` is only honoured on create; updates never touch the state.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_id: UserId,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub hour_price: f64,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub publish: bool,
}

impl AdInput {
    /// Run all field checks, converting failures into `CoreError::Validation`.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(CoreError::from)
    }

    /// State a freshly created ad starts in.
    pub fn initial_state(&self) -> Result<AdState, CoreError> {
        if self.publish {
            AdState::Draft.transition(AdState::Published)
        } else {
            Ok(AdState::Draft)
        }
    }
}
