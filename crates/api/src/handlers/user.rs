//! Handlers for the `/users` resource.
//!
//! Users are addressed by the identity provider's `uid`, not by row id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::user::{User, UserInput};
use marketplace_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(uid: &str) -> AppError {
    AppError::NotFound(format!("User '{uid}' not found"))
}

/// POST /api/v1/users
///
/// A duplicate uid is rejected with 409 by the `uq_users_uid` constraint.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.check()?;
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(uid = %user.uid, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{uid}
pub async fn get_by_uid(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_uid(&state.pool, &uid)
        .await?
        .ok_or_else(|| not_found(&uid))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{uid}
///
/// Returns 204 when the user exists, 404 otherwise.
pub async fn update(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(input): Json<UserInput>,
) -> AppResult<StatusCode> {
    input.check()?;
    input.check_uid(&uid)?;
    UserRepo::update_by_uid(&state.pool, &uid, &input)
        .await?
        .ok_or_else(|| not_found(&uid))?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{uid}
pub async fn delete(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<StatusCode> {
    if UserRepo::delete_by_uid(&state.pool, &uid).await? {
        tracing::info!(%uid, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&uid))
    }
}
