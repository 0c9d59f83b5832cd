//! Form return entity model and DTOs.

use formreturn_core::form_return::FormReturnFields;
use formreturn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `form_returns` table.
///
/// Serialized with the camelCase names the form uses (`firstName`,
/// `numberOfSigners`, `type`, ...).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReturn {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub organization_name: String,
    pub address_line1: String,
    pub district: String,
    pub amphoe: String,
    pub province: String,
    pub zipcode: String,
    #[serde(rename = "type")]
    pub region_type: String,
    pub phone_number: String,
    pub number_of_signers: i32,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FormReturn {
    /// Assemble a row from parsed fields. Used by stores that do not go
    /// through SQL.
    pub fn from_fields(
        id: DbId,
        fields: &FormReturnFields,
        image1: Option<String>,
        image2: Option<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            organization_name: fields.organization_name.clone(),
            address_line1: fields.address_line1.clone(),
            district: fields.district.clone(),
            amphoe: fields.amphoe.clone(),
            province: fields.province.clone(),
            zipcode: fields.zipcode.clone(),
            region_type: fields.region_type.clone(),
            phone_number: fields.phone_number.clone(),
            number_of_signers: fields.number_of_signers,
            image1,
            image2,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every non-image field; image slots change only when a new
    /// path is given.
    pub fn apply_update(&mut self, input: &UpdateFormReturn, now: Timestamp) {
        let f = &input.fields;
        self.first_name = f.first_name.clone();
        self.last_name = f.last_name.clone();
        self.organization_name = f.organization_name.clone();
        self.address_line1 = f.address_line1.clone();
        self.district = f.district.clone();
        self.amphoe = f.amphoe.clone();
        self.province = f.province.clone();
        self.zipcode = f.zipcode.clone();
        self.region_type = f.region_type.clone();
        self.phone_number = f.phone_number.clone();
        self.number_of_signers = f.number_of_signers;
        if let Some(path) = &input.image1 {
            self.image1 = Some(path.clone());
        }
        if let Some(path) = &input.image2 {
            self.image2 = Some(path.clone());
        }
        self.updated_at = now;
    }
}

/// DTO for creating a new form return.
#[derive(Debug, Clone)]
pub struct CreateFormReturn {
    pub fields: FormReturnFields,
    pub image1: Option<String>,
    pub image2: Option<String>,
}

/// DTO for replacing a form return in place.
///
/// `None` image paths keep whatever the record currently stores.
#[derive(Debug, Clone)]
pub struct UpdateFormReturn {
    pub fields: FormReturnFields,
    pub image1: Option<String>,
    pub image2: Option<String>,
}
