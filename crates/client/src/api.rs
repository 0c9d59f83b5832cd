//! REST client for the `/api/records` endpoints.
//!
//! Creates and updates are sent as `multipart/form-data` using the text
//! fields and images of a [`SubmitPayload`].

use formreturn_core::form_editor::{SelectedImage, SubmitPayload};
use formreturn_core::form_return::SortDirection;
use formreturn_core::types::DbId;
use formreturn_core::upload::ImageSlot;
use formreturn_db::models::form_return::FormReturn;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

/// HTTP client for one form return service.
#[derive(Debug, Clone)]
pub struct FormReturnClient {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the form return API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        /// Machine-readable code from the error body, e.g. `CONFLICT`.
        code: String,
        message: String,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
        }
    }

    /// The service rejected a duplicate phone number.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT.as_u16())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

#[derive(Deserialize)]
struct ListResponse {
    forms: Vec<FormReturn>,
}

#[derive(Deserialize)]
struct PhoneCheckResponse {
    exists: bool,
}

impl FormReturnClient {
    /// * `base_url` - Service root without trailing slash, e.g.
    ///   `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/records`
    pub async fn list(
        &self,
        search: &str,
        sort: SortDirection,
    ) -> Result<Vec<FormReturn>, ClientError> {
        let response = self
            .client
            .get(self.records_url())
            .query(&[("search", search), ("sort", sort.as_str())])
            .send()
            .await?;

        let body: ListResponse = Self::parse_response(response).await?;
        Ok(body.forms)
    }

    /// `GET /api/records/{id}`; `None` when the id is unknown.
    pub async fn get(&self, id: DbId) -> Result<Option<FormReturn>, ClientError> {
        let response = self
            .client
            .get(format!("{}/{id}", self.records_url()))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /api/records/check-phone`
    pub async fn phone_exists(&self, phone_number: &str) -> Result<bool, ClientError> {
        let response = self
            .client
            .get(format!("{}/check-phone", self.records_url()))
            .query(&[("phoneNumber", phone_number)])
            .send()
            .await?;

        let body: PhoneCheckResponse = Self::parse_response(response).await?;
        Ok(body.exists)
    }

    /// `POST /api/records`
    pub async fn create(&self, payload: &SubmitPayload) -> Result<FormReturn, ClientError> {
        let response = self
            .client
            .post(self.records_url())
            .multipart(multipart_form(payload))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `PUT /api/records/{id}`. Images left out of `payload` are kept.
    pub async fn update(
        &self,
        id: DbId,
        payload: &SubmitPayload,
    ) -> Result<FormReturn, ClientError> {
        let response = self
            .client
            .put(format!("{}/{id}", self.records_url()))
            .multipart(multipart_form(payload))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `DELETE /api/records/{id}`
    pub async fn delete(&self, id: DbId) -> Result<FormReturn, ClientError> {
        let response = self
            .client
            .delete(format!("{}/{id}", self.records_url()))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn records_url(&self) -> String {
        format!("{}/api/records", self.base_url)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], reading the
    /// `{error, code}` body when there is one.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.error),
            Err(_) => ("UNKNOWN".to_string(), text),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

fn multipart_form(payload: &SubmitPayload) -> Form {
    let mut form = payload
        .fields
        .iter()
        .fold(Form::new(), |form, (name, value)| form.text(*name, value.clone()));

    for (slot, image) in [
        (ImageSlot::Image1, &payload.image1),
        (ImageSlot::Image2, &payload.image2),
    ] {
        if let Some(image) = image {
            form = form.part(slot.field_name(), image_part(image));
        }
    }
    form
}

fn image_part(image: &SelectedImage) -> Part {
    Part::bytes(image.bytes.clone()).file_name(image.file_name.clone())
}
