//! Route definitions for the `/reservations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reservation;
use crate::state::AppState;

/// Routes mounted at `/reservations`.
///
/// ```text
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// POST   /{id}/cancel         -> cancel
/// GET    /status/{status}     -> list_by_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservation::create))
        .route(
            "/{id}",
            get(reservation::get_by_id)
                .put(reservation::update)
                .delete(reservation::delete),
        )
        .route("/{id}/cancel", post(reservation::cancel))
        .route("/status/{status}", get(reservation::list_by_status))
}
