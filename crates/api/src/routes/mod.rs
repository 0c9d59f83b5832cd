pub mod form_return;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /records                  list, create
/// /records/check-phone      phone number lookup
/// /records/{id}             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/records", form_return::router())
}
