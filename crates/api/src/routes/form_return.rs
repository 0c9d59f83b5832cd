//! Route definitions for form return records.

use axum::routing::get;
use axum::Router;

use crate::handlers::form_return;
use crate::state::AppState;

/// Routes mounted at `/api/records`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /check-phone    -> check_phone
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form_return::list).post(form_return::create))
        .route("/check-phone", get(form_return::check_phone))
        .route(
            "/{id}",
            get(form_return::get_by_id)
                .put(form_return::update)
                .delete(form_return::delete),
        )
}
