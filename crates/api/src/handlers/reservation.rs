//! Handlers for the `/reservations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::reservation::{Reservation, ReservationInput, ReservationStatus};
use marketplace_core::types::DbId;
use marketplace_db::repositories::ReservationRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Reservation",
        id,
    })
}

fn ad_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Ad", id })
}

/// POST /api/v1/reservations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ReservationInput>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    input.check()?;
    let reservation = ReservationRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| ad_not_found(input.ad_id))?;
    tracing::info!(
        reservation_id = reservation.id,
        ad_id = reservation.ad_id,
        status = ?reservation.status,
        "Reservation created",
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/v1/reservations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(reservation))
}

/// PUT /api/v1/reservations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReservationInput>,
) -> AppResult<Json<Reservation>> {
    input.check()?;
    ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let reservation = ReservationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| ad_not_found(input.ad_id))?;
    Ok(Json(reservation))
}

/// DELETE /api/v1/reservations/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ReservationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/reservations/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(reservation_id = id, ad_id = reservation.ad_id, "Reservation cancelled");
    Ok(Json(reservation))
}

/// GET /api/v1/reservations/status/{status}
///
/// Accepts the status name (`active`, `cancelled`) or its numeric id.
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let status = parse_status(&status)?;
    let reservations = ReservationRepo::list_by_status(&state.pool, status).await?;
    Ok(Json(reservations))
}

fn parse_status(raw: &str) -> Result<ReservationStatus, AppError> {
    match raw.to_ascii_lowercase().as_str() {
        "active" => Ok(ReservationStatus::Active),
        "cancelled" => Ok(ReservationStatus::Cancelled),
        other => other
            .parse::<i16>()
            .ok()
            .and_then(|id| ReservationStatus::from_id(id).ok())
            .ok_or_else(|| AppError::BadRequest(format!("Unknown reservation status '{raw}'"))),
    }
}
