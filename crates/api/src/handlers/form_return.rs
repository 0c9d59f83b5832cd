//! Handlers for form return records.
//!
//! Creates and updates arrive as multipart bodies: the text fields are
//! validated first, then any image parts are written below the public
//! directory and their `/images/...` paths stored on the record.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use formreturn_core::error::CoreError;
use formreturn_core::form_return::ENTITY;
use formreturn_core::types::DbId;
use formreturn_db::models::form_return::{CreateFormReturn, FormReturn, UpdateFormReturn};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::form_data::read_submission;
use crate::query::{ListParams, PhoneCheckParams};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub forms: Vec<FormReturn>,
}

#[derive(Debug, Serialize)]
pub struct PhoneCheckResponse {
    pub exists: bool,
}

/// GET /api/records
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse>> {
    let forms = state
        .store
        .list(params.search(), params.direction())
        .await?;
    Ok(Json(ListResponse { forms }))
}

/// GET /api/records/check-phone
pub async fn check_phone(
    State(state): State<AppState>,
    Query(params): Query<PhoneCheckParams>,
) -> AppResult<Json<PhoneCheckResponse>> {
    let phone_number = params.phone_number.trim();
    if phone_number.is_empty() {
        return Err(CoreError::Validation("phoneNumber is required".to_string()).into());
    }
    let exists = state.store.phone_exists(phone_number).await?;
    Ok(Json(PhoneCheckResponse { exists }))
}

/// GET /api/records/{id}
///
/// An unknown id answers `null` rather than 404.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Option<FormReturn>>> {
    Ok(Json(state.store.get(id).await?))
}

/// POST /api/records
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<FormReturn>)> {
    let submission = read_submission(multipart).await?;
    let fields = submission.fields()?;
    let images = state.uploads.save_all(&submission.files).await?;

    let input = CreateFormReturn {
        fields,
        image1: images.image1.clone(),
        image2: images.image2.clone(),
    };
    let record = match state.store.create(&input).await {
        Ok(record) => record,
        Err(e) => {
            state.uploads.discard(&images).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        id = record.id,
        images = images.paths().count(),
        "Form return created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/records/{id}
///
/// Replaces every text field. Image slots without a new file keep their
/// current path.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<FormReturn>> {
    let submission = read_submission(multipart).await?;
    let fields = submission.fields()?;
    let images = state.uploads.save_all(&submission.files).await?;

    let input = UpdateFormReturn {
        fields,
        image1: images.image1.clone(),
        image2: images.image2.clone(),
    };
    let updated = match state.store.update(id, &input).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            state.uploads.discard(&images).await;
            return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
        }
        Err(e) => {
            state.uploads.discard(&images).await;
            return Err(e.into());
        }
    };

    tracing::info!(id, images = images.paths().count(), "Form return updated");
    Ok(Json(updated))
}

/// DELETE /api/records/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FormReturn>> {
    let deleted = state
        .store
        .delete(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(id, "Form return deleted");
    Ok(Json(deleted))
}
