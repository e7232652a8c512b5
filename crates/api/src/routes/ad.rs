//! Route definitions for the `/ads` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ad;
use crate::state::AppState;

/// Routes mounted at `/ads`.
///
/// ```text
/// GET    /                    -> search
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// POST   /{id}/publish        -> publish
/// POST   /{id}/unpublish      -> unpublish
/// GET    /{id}/reservations   -> list_reservations
/// GET    /{id}/feedback       -> list_feedback
/// GET    /{id}/rating         -> rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ad::search).post(ad::create))
        .route(
            "/{id}",
            get(ad::get_by_id).put(ad::update).delete(ad::delete),
        )
        .route("/{id}/publish", post(ad::publish))
        .route("/{id}/unpublish", post(ad::unpublish))
        .route("/{id}/reservations", get(ad::list_reservations))
        .route("/{id}/feedback", get(ad::list_feedback))
        .route("/{id}/rating", get(ad::rating))
}
