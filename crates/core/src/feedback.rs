//! Feedback entity and rating bounds.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp, UserId};

/// Lowest accepted rating.
pub const MIN_RATING: i16 = 1;

/// Highest accepted rating.
pub const MAX_RATING: i16 = 5;

/// A rating and comment left against an ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: DbId,
    pub ad_id: DbId,
    pub user_id: UserId,
    pub rating: i16,
    pub comment: String,
    pub date: Timestamp,
}

/// Fields a client supplies when leaving or editing feedback.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackInput {
    pub ad_id: DbId,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_id: UserId,
    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "must be between 1 and 5"))]
    pub rating: i16,
    #[serde(default)]
    pub comment: String,
    /// Defaults to the time of insertion when omitted.
    pub date: Option<Timestamp>,
}

impl FeedbackInput {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(CoreError::from)
    }
}
