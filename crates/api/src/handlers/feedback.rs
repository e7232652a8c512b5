//! Handlers for the `/feedback` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::feedback::{Feedback, FeedbackInput};
use marketplace_core::types::DbId;
use marketplace_db::repositories::FeedbackRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Feedback",
        id,
    })
}

/// POST /api/v1/feedback
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<FeedbackInput>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    input.check()?;
    let feedback = FeedbackRepo::create(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: input.ad_id,
        }))?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// GET /api/v1/feedback/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Feedback>> {
    let feedback = FeedbackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(feedback))
}

/// PUT /api/v1/feedback/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FeedbackInput>,
) -> AppResult<Json<Feedback>> {
    input.check()?;
    FeedbackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let feedback = FeedbackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: input.ad_id,
        }))?;
    Ok(Json(feedback))
}

/// DELETE /api/v1/feedback/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if FeedbackRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
