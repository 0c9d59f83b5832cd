//! HTTP client for the form return API and the drivers that run a
//! [`FormEditor`](formreturn_core::form_editor::FormEditor) submission
//! against it.

pub mod api;
pub mod driver;

pub use api::{ClientError, FormReturnClient};
pub use driver::{check_phone, submit, SubmitOutcome};
