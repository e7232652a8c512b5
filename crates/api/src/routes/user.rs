//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                    -> create
/// GET    /{uid}               -> get_by_uid
/// PUT    /{uid}               -> update
/// DELETE /{uid}               -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(user::create)).route(
        "/{uid}",
        get(user::get_by_uid).put(user::update).delete(user::delete),
    )
}
