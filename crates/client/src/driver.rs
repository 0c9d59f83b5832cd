//! Runs the network side of the form flow for a [`FormEditor`].
//!
//! The editor owns the state machine; these functions perform the phone
//! lookup and the create request and report the result back into it.

use formreturn_core::form_editor::{FormEditor, FormError, FormField, MSG_SUBMIT_FAILED};
use formreturn_core::form_return::FIELD_PHONE_NUMBER;
use formreturn_db::models::form_return::FormReturn;

use crate::api::FormReturnClient;

/// What a submission attempt ended with.
#[derive(Debug)]
pub enum SubmitOutcome {
    Created(FormReturn),
    /// The phone number is registered; nothing was created.
    PhoneInUse,
    /// The create request failed; carries the underlying error text.
    Failed(String),
}

/// Submit the editor's draft.
///
/// Looks the phone number up first and stops there if it is taken. A failed
/// lookup does not block the create. A 409 from the create is reported the
/// same way as a taken number.
pub async fn submit(
    editor: &mut FormEditor<'_>,
    client: &FormReturnClient,
) -> Result<SubmitOutcome, FormError> {
    let payload = editor.begin_submit()?;
    let phone = payload
        .fields
        .iter()
        .find(|(name, _)| *name == FIELD_PHONE_NUMBER)
        .map(|(_, value)| value.trim())
        .unwrap_or_default();

    match client.phone_exists(phone).await {
        Ok(true) => {
            editor.phone_taken()?;
            return Ok(SubmitOutcome::PhoneInUse);
        }
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "Phone lookup failed, submitting anyway"),
    }

    match client.create(&payload).await {
        Ok(record) => {
            editor.submit_succeeded(record.id)?;
            tracing::info!(id = record.id, "Form submitted");
            Ok(SubmitOutcome::Created(record))
        }
        Err(e) if e.is_conflict() => {
            editor.phone_taken()?;
            Ok(SubmitOutcome::PhoneInUse)
        }
        Err(e) => {
            tracing::error!(error = %e, "Form submission failed");
            editor.submit_failed(MSG_SUBMIT_FAILED)?;
            Ok(SubmitOutcome::Failed(e.to_string()))
        }
    }
}

/// The phone input lost focus: look the number up and leave a notice on
/// the editor if it is taken. Returns whether it is taken.
///
/// A blank number or a failed lookup counts as not taken.
pub async fn check_phone(editor: &mut FormEditor<'_>, client: &FormReturnClient) -> bool {
    let phone = editor.draft().get(FormField::PhoneNumber).trim().to_string();
    if phone.is_empty() {
        return false;
    }

    match client.phone_exists(&phone).await {
        Ok(true) => {
            editor.note_phone_taken();
            true
        }
        Ok(false) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Phone lookup failed");
            false
        }
    }
}
