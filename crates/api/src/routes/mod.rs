pub mod ad;
pub mod feedback;
pub mod health;
pub mod reservation;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ads                                  search (GET), create (POST)
/// /ads/{id}                             get, update, delete
/// /ads/{id}/publish                     publish (POST)
/// /ads/{id}/unpublish                   unpublish (POST)
/// /ads/{id}/reservations                reservations for the ad
/// /ads/{id}/feedback                    feedback for the ad
/// /ads/{id}/rating                      average rating and count
///
/// /reservations                         create (POST)
/// /reservations/{id}                    get, update, delete
/// /reservations/{id}/cancel             cancel (POST)
/// /reservations/status/{status}         list by status
///
/// /feedback                             create (POST)
/// /feedback/{id}                        get, update, delete
///
/// /users                                create (POST)
/// /users/{uid}                          get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ads", ad::router())
        .nest("/reservations", reservation::router())
        .nest("/feedback", feedback::router())
        .nest("/users", user::router())
}
