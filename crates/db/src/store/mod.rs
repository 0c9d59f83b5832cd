//! The record store the HTTP layer depends on.
//!
//! Handlers receive a [`SharedStore`] through application state, so the
//! backend is picked once at startup: [`PgFormReturnStore`] when a database
//! is configured, [`MemoryFormReturnStore`] otherwise and in tests.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use formreturn_core::form_return::SortDirection;
use formreturn_core::types::DbId;

use crate::models::form_return::{CreateFormReturn, FormReturn, UpdateFormReturn};

pub use memory::MemoryFormReturnStore;
pub use postgres::PgFormReturnStore;

/// Errors a store can report besides "no such row" (which is `None`).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another record already uses this phone number.
    #[error("Phone number {0} is already in use")]
    DuplicatePhone(String),

    /// The backing database failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// CRUD over form returns.
///
/// Writes reject a phone number held by a different record with
/// [`StoreError::DuplicatePhone`]. Concurrent updates of one record are
/// last-write-wins.
#[async_trait]
pub trait FormReturnStore: Send + Sync + 'static {
    async fn get(&self, id: DbId) -> Result<Option<FormReturn>, StoreError>;

    /// Records whose first or last name contains `search` (case-sensitive;
    /// empty matches all), ordered by `created_at` then `id` in `sort`
    /// direction.
    async fn list(&self, search: &str, sort: SortDirection) -> Result<Vec<FormReturn>, StoreError>;

    async fn create(&self, input: &CreateFormReturn) -> Result<FormReturn, StoreError>;

    /// Returns `None` if `id` does not exist.
    async fn update(
        &self,
        id: DbId,
        input: &UpdateFormReturn,
    ) -> Result<Option<FormReturn>, StoreError>;

    /// Remove a record, returning it. `None` if `id` does not exist.
    async fn delete(&self, id: DbId) -> Result<Option<FormReturn>, StoreError>;

    async fn phone_exists(&self, phone_number: &str) -> Result<bool, StoreError>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Store handle shared across requests.
pub type SharedStore = Arc<dyn FormReturnStore>;
