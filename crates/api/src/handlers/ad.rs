//! Handlers for the `/ads` resource.
//!
//! Ad mutations go through [`AdLifecycleGuard`](marketplace_core::lifecycle::AdLifecycleGuard)
//! so validation, publication rules and the reservation guard on delete are
//! enforced in one place.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::ad::{Ad, AdInput};
use marketplace_core::feedback::Feedback;
use marketplace_core::rating::RatingSummary;
use marketplace_core::reservation::Reservation;
use marketplace_core::types::DbId;
use marketplace_db::repositories::{FeedbackRepo, ReservationRepo};

use crate::error::AppResult;
use crate::query::SearchParams;
use crate::state::AppState;

/// GET /api/v1/ads
///
/// With no parameters, returns every published ad. Supplied filters
/// (radius, availability window, minimum rating) are AND-combined.
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<Vec<Ad>>> {
    let Query(params) = query?;
    let criteria = params.into_criteria()?;
    let ads = state.search.search(&criteria).await?;
    Ok(Json(ads))
}

/// POST /api/v1/ads
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<AdInput>,
) -> AppResult<(StatusCode, Json<Ad>)> {
    let ad = state.lifecycle.create(&input).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

/// GET /api/v1/ads/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ad>> {
    let ad = state.lifecycle.get(id).await?;
    Ok(Json(ad))
}

/// PUT /api/v1/ads/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdInput>,
) -> AppResult<StatusCode> {
    state.lifecycle.update(id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/ads/{id}
///
/// Refused with 409 while an active reservation references the ad.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.lifecycle.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/ads/{id}/publish
pub async fn publish(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.lifecycle.publish(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/ads/{id}/unpublish
pub async fn unpublish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.lifecycle.unpublish(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/ads/{id}/reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Reservation>>> {
    state.lifecycle.get(id).await?;
    let reservations = ReservationRepo::list_by_ad(&state.pool, id).await?;
    Ok(Json(reservations))
}

/// GET /api/v1/ads/{id}/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Feedback>>> {
    state.lifecycle.get(id).await?;
    let feedback = FeedbackRepo::list_by_ad(&state.pool, id).await?;
    Ok(Json(feedback))
}

/// GET /api/v1/ads/{id}/rating
pub async fn rating(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RatingSummary>> {
    state.lifecycle.get(id).await?;
    let summary = state.ratings.summary(id).await?;
    Ok(Json(summary))
}
