//! Reading multipart submissions.

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use formreturn_core::form_return::{FormReturnFields, REQUIRED_FIELDS};
use formreturn_core::upload::ImageSlot;

use crate::error::{AppError, AppResult};
use crate::uploads::UploadedFile;

/// The parts of one create/update request.
#[derive(Debug, Default)]
pub struct FormSubmission {
    /// Text values keyed by form field name.
    pub text: HashMap<String, String>,
    /// At most one file per slot; a repeated slot keeps the last part.
    pub files: Vec<UploadedFile>,
}

impl FormSubmission {
    /// Validate and type the text fields.
    pub fn fields(&self) -> AppResult<FormReturnFields> {
        Ok(FormReturnFields::from_form(&self.text)?)
    }
}

/// Drain a multipart body into a [`FormSubmission`].
///
/// `image1`/`image2` parts are files. A file part without bytes counts as
/// "no file". Parts with unknown names are skipped.
pub async fn read_submission(mut multipart: Multipart) -> AppResult<FormSubmission> {
    let mut submission = FormSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if let Some(slot) = ImageSlot::from_field_name(&name) {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if bytes.is_empty() {
                continue;
            }
            submission.files.retain(|f| f.slot != slot);
            submission.files.push(UploadedFile {
                slot,
                file_name,
                bytes,
            });
        } else if REQUIRED_FIELDS.contains(&name.as_str()) {
            let value = field.text().await.map_err(multipart_error)?;
            submission.text.insert(name, value);
        } else {
            tracing::debug!(field = %name, "Ignoring unknown multipart field");
        }
    }

    Ok(submission)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}
