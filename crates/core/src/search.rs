//! Ad search: criteria validation, composable predicates and the engine.
//!
//! Every search applies the published baseline, then each supplied filter
//! in order (radius, availability, rating). Filters are AND-combined and a
//! failing filter short-circuits the rest for that ad.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use serde::Deserialize;

use crate::ad::Ad;
use crate::availability::AvailabilityFilter;
use crate::error::CoreError;
use crate::feedback::MAX_RATING;
use crate::geo;
use crate::ports::{AdRepository, FeedbackRepository, ReservationRepository};
use crate::rating::{meets_minimum, RatingAggregator};
use crate::reservation::TimeWindow;
use crate::types::Timestamp;

/// Default number of candidate ads evaluated concurrently.
pub const DEFAULT_SEARCH_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Raw, optional search criteria as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub begin_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub min_rating: Option<f64>,
}

/// A search centre and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// Criteria whose groups are complete and whose values are in range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedCriteria {
    pub near: Option<GeoFilter>,
    pub window: Option<TimeWindow>,
    pub min_rating: Option<f64>,
}

impl SearchCriteria {
    /// Reject partial groups and out-of-range values before any filtering.
    pub fn validate(&self) -> Result<ValidatedCriteria, CoreError> {
        let near = match (self.latitude, self.longitude, self.radius_km) {
            (None, None, None) => None,
            (Some(latitude), Some(longitude), Some(radius_km)) => {
                if !geo::is_valid_coordinate(latitude, longitude) {
                    return Err(CoreError::Validation(format!(
                        "Search point ({latitude}, {longitude}) is outside legal coordinate ranges"
                    )));
                }
                if !radius_km.is_finite() || radius_km < 0.0 {
                    return Err(CoreError::Validation(format!(
                        "distance must be a non-negative number of kilometres, got {radius_km}"
                    )));
                }
                Some(GeoFilter {
                    latitude,
                    longitude,
                    radius_km,
                })
            }
            _ => {
                return Err(CoreError::Validation(
                    "latitude, longitude and distance must be supplied together".to_string(),
                ))
            }
        };

        let window = match (self.begin_date, self.end_date) {
            (None, None) => None,
            (Some(begin), Some(end)) => Some(TimeWindow::new(begin, end)?),
            _ => {
                return Err(CoreError::Validation(
                    "beginDate and endDate must be supplied together".to_string(),
                ))
            }
        };

        if let Some(min) = self.min_rating {
            if !(0.0..=f64::from(MAX_RATING)).contains(&min) {
                return Err(CoreError::Validation(format!(
                    "minRate must be between 0 and {MAX_RATING}, got {min}"
                )));
            }
        }

        Ok(ValidatedCriteria {
            near,
            window,
            min_rating: self.min_rating,
        })
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// A yes/no test over a single ad.
#[async_trait]
pub trait AdPredicate: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    async fn matches(&self, ad: &Ad) -> Result<bool, CoreError>;
}

/// Baseline: only published ads are ever returned.
pub struct IsPublished;

#[async_trait]
impl AdPredicate for IsPublished {
    fn name(&self) -> &'static str {
        "published"
    }

    async fn matches(&self, ad: &Ad) -> Result<bool, CoreError> {
        Ok(ad.is_published())
    }
}

/// Ad lies within `radius_km` of a point (inclusive).
pub struct WithinRadius(pub GeoFilter);

#[async_trait]
impl AdPredicate for WithinRadius {
    fn name(&self) -> &'static str {
        "radius"
    }

    async fn matches(&self, ad: &Ad) -> Result<bool, CoreError> {
        let GeoFilter {
            latitude,
            longitude,
            radius_km,
        } = self.0;
        Ok(geo::distance_km(latitude, longitude, ad.latitude, ad.longitude) <= radius_km)
    }
}

/// Ad has no active reservation overlapping the window.
pub struct AvailableDuring {
    pub filter: AvailabilityFilter,
    pub window: TimeWindow,
}

#[async_trait]
impl AdPredicate for AvailableDuring {
    fn name(&self) -> &'static str {
        "availability"
    }

    async fn matches(&self, ad: &Ad) -> Result<bool, CoreError> {
        self.filter.is_available(ad.id, &self.window).await
    }
}

/// Ad's average rating meets the threshold.
pub struct MinimumRating {
    pub aggregator: RatingAggregator,
    pub threshold: f64,
}

#[async_trait]
impl AdPredicate for MinimumRating {
    fn name(&self) -> &'static str {
        "rating"
    }

    async fn matches(&self, ad: &Ad) -> Result<bool, CoreError> {
        let average = self.aggregator.average_rating(ad.id).await?;
        Ok(meets_minimum(average, self.threshold))
    }
}

/// Conjunction of predicates, evaluated in order with short-circuit.
#[derive(Default)]
pub struct AllOf(Vec<Box<dyn AdPredicate>>);

impl AllOf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: impl AdPredicate + 'static) -> Self {
        self.0.push(Box::new(predicate));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|p| p.name()).collect()
    }
}

#[async_trait]
impl AdPredicate for AllOf {
    fn name(&self) -> &'static str {
        "all_of"
    }

    async fn matches(&self, ad: &Ad) -> Result<bool, CoreError> {
        for predicate in &self.0 {
            if !predicate.matches(ad).await? {
                tracing::trace!(ad_id = ad.id, filter = predicate.name(), "Ad rejected");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Filters the full ad set down to the ads matching a search.
#[derive(Clone)]
pub struct AdSearchEngine {
    ads: Arc<dyn AdRepository>,
    availability: AvailabilityFilter,
    ratings: RatingAggregator,
    concurrency: usize,
}

impl AdSearchEngine {
    pub fn new(
        ads: Arc<dyn AdRepository>,
        reservations: Arc<dyn ReservationRepository>,
        feedback: Arc<dyn FeedbackRepository>,
    ) -> Self {
        Self {
            ads,
            availability: AvailabilityFilter::new(reservations),
            ratings: RatingAggregator::new(feedback),
            concurrency: DEFAULT_SEARCH_CONCURRENCY,
        }
    }

    /// Bound the number of ads evaluated at once. Clamped to at least 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Build the filter chain for already-validated criteria.
    ///
    /// Cheap in-memory checks come first so repository-backed filters only
    /// run for ads that survived them.
    pub fn build_predicate(&self, criteria: &ValidatedCriteria) -> AllOf {
        let mut chain = AllOf::new().and(IsPublished);
        if let Some(near) = criteria.near {
            chain = chain.and(WithinRadius(near));
        }
        if let Some(window) = criteria.window {
            chain = chain.and(AvailableDuring {
                filter: self.availability.clone(),
                window,
            });
        }
        if let Some(threshold) = criteria.min_rating {
            chain = chain.and(MinimumRating {
                aggregator: self.ratings.clone(),
                threshold,
            });
        }
        chain
    }

    /// Return the published ads matching every supplied criterion, in
    /// repository order.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Ad>, CoreError> {
        let criteria = criteria.validate()?;
        let predicate = self.build_predicate(&criteria);
        let candidates = self.ads.list().await?;
        let candidate_count = candidates.len();

        let predicate = &predicate;
        let verdicts: Vec<(Ad, bool)> = futures::stream::iter(candidates)
            .map(|ad| async move {
                let keep = predicate.matches(&ad).await?;
                Ok::<_, CoreError>((ad, keep))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let results: Vec<Ad> = verdicts
            .into_iter()
            .filter_map(|(ad, keep)| keep.then_some(ad))
            .collect();

        tracing::debug!(
            filters = ?predicate.names(),
            candidates = candidate_count,
            matched = results.len(),
            "Ad search complete"
        );
        Ok(results)
    }
}
