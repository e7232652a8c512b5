//! Average rating of an ad and the minimum-rating policy.

use std::sync::Arc;

use serde::Serialize;

use crate::error::CoreError;
use crate::feedback::Feedback;
use crate::ports::FeedbackRepository;
use crate::types::DbId;

/// Arithmetic mean of the ratings, `None` when there are none.
pub fn mean_rating(feedback: &[Feedback]) -> Option<f64> {
    if feedback.is_empty() {
        return None;
    }
    let total: f64 = feedback.iter().map(|f| f64::from(f.rating)).sum();
    Some(total / feedback.len() as f64)
}

/// Minimum-rating policy.
///
/// - A threshold `<= 0` is vacuous: every ad passes, rated or not.
/// - An unrated ad fails any positive threshold.
/// - Otherwise the boundary is inclusive (`average >= threshold`).
pub fn meets_minimum(average: Option<f64>, threshold: f64) -> bool {
    if threshold <= 0.0 {
        return true;
    }
    average.is_some_and(|avg| avg >= threshold)
}

/// Rating read-out for a single ad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub ad_id: DbId,
    pub average: Option<f64>,
    pub count: usize,
}

/// Computes averages by reading an ad's feedback.
#[derive(Clone)]
pub struct RatingAggregator {
    feedback: Arc<dyn FeedbackRepository>,
}

impl RatingAggregator {
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }

    pub async fn summary(&self, ad_id: DbId) -> Result<RatingSummary, CoreError> {
        let feedback = self.feedback.list_by_ad(ad_id).await?;
        Ok(RatingSummary {
            ad_id,
            average: mean_rating(&feedback),
            count: feedback.len(),
        })
    }

    pub async fn average_rating(&self, ad_id: DbId) -> Result<Option<f64>, CoreError> {
        Ok(self.summary(ad_id).await?.average)
    }
}
