use std::collections::BTreeMap;

use async_trait::async_trait;
use formreturn_core::form_return::SortDirection;
use formreturn_core::types::DbId;
use tokio::sync::RwLock;

use super::{FormReturnStore, StoreError};
use crate::models::form_return::{CreateFormReturn, FormReturn, UpdateFormReturn};

/// In-process store. Data lives as long as the value does.
///
/// Writers are serialized by the lock, so the phone-number check and the
/// insert happen atomically.
#[derive(Default)]
pub struct MemoryFormReturnStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, FormReturn>,
}

impl Inner {
    fn phone_taken(&self, phone_number: &str, except: Option<DbId>) -> bool {
        self.rows
            .values()
            .any(|r| r.phone_number == phone_number && Some(r.id) != except)
    }
}

impl MemoryFormReturnStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormReturnStore for MemoryFormReturnStore {
    async fn get(&self, id: DbId) -> Result<Option<FormReturn>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn list(&self, search: &str, sort: SortDirection) -> Result<Vec<FormReturn>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<FormReturn> = inner
            .rows
            .values()
            .filter(|r| r.first_name.contains(search) || r.last_name.contains(search))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        if sort == SortDirection::Desc {
            rows.reverse();
        }
        Ok(rows)
    }

    async fn create(&self, input: &CreateFormReturn) -> Result<FormReturn, StoreError> {
        let mut inner = self.inner.write().await;
        let phone = &input.fields.phone_number;
        if inner.phone_taken(phone, None) {
            return Err(StoreError::DuplicatePhone(phone.clone()));
        }

        inner.last_id += 1;
        let row = FormReturn::from_fields(
            inner.last_id,
            &input.fields,
            input.image1.clone(),
            input.image2.clone(),
            chrono::Utc::now(),
        );
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateFormReturn,
    ) -> Result<Option<FormReturn>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.rows.contains_key(&id) {
            return Ok(None);
        }
        let phone = &input.fields.phone_number;
        if inner.phone_taken(phone, Some(id)) {
            return Err(StoreError::DuplicatePhone(phone.clone()));
        }

        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.apply_update(input, chrono::Utc::now());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<Option<FormReturn>, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id))
    }

    async fn phone_exists(&self, phone_number: &str) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.phone_taken(phone_number, None))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
