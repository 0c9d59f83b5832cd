use async_trait::async_trait;
use formreturn_core::form_return::SortDirection;
use formreturn_core::types::DbId;

use super::{FormReturnStore, StoreError};
use crate::models::form_return::{CreateFormReturn, FormReturn, UpdateFormReturn};
use crate::repositories::{FormReturnRepo, PHONE_NUMBER_CONSTRAINT};
use crate::DbPool;

/// PostgreSQL-backed store delegating to [`FormReturnRepo`].
#[derive(Clone)]
pub struct PgFormReturnStore {
    pool: DbPool,
}

impl PgFormReturnStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Turn a phone-number unique violation (SQLSTATE 23505) into
/// [`StoreError::DuplicatePhone`]; pass everything else through.
fn classify(err: sqlx::Error, phone_number: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(PHONE_NUMBER_CONSTRAINT)
        {
            tracing::debug!(phone_number, "Phone number unique constraint violated");
            return StoreError::DuplicatePhone(phone_number.to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl FormReturnStore for PgFormReturnStore {
    async fn get(&self, id: DbId) -> Result<Option<FormReturn>, StoreError> {
        Ok(FormReturnRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(&self, search: &str, sort: SortDirection) -> Result<Vec<FormReturn>, StoreError> {
        Ok(FormReturnRepo::list(&self.pool, search, sort).await?)
    }

    async fn create(&self, input: &CreateFormReturn) -> Result<FormReturn, StoreError> {
        FormReturnRepo::create(&self.pool, input)
            .await
            .map_err(|e| classify(e, &input.fields.phone_number))
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateFormReturn,
    ) -> Result<Option<FormReturn>, StoreError> {
        FormReturnRepo::update(&self.pool, id, input)
            .await
            .map_err(|e| classify(e, &input.fields.phone_number))
    }

    async fn delete(&self, id: DbId) -> Result<Option<FormReturn>, StoreError> {
        Ok(FormReturnRepo::delete(&self.pool, id).await?)
    }

    async fn phone_exists(&self, phone_number: &str) -> Result<bool, StoreError> {
        Ok(FormReturnRepo::phone_exists(&self.pool, phone_number).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
