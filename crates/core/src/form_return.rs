//! Form return field names, parsing and validation.
//!
//! Submissions arrive as loose text (multipart form fields). This module turns
//! them into a typed [`FormReturnFields`] before anything reaches the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Entity name used in not-found errors.
pub const ENTITY: &str = "FormReturn";

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_ORGANIZATION_NAME: &str = "organizationName";
pub const FIELD_ADDRESS_LINE1: &str = "addressLine1";
pub const FIELD_DISTRICT: &str = "district";
pub const FIELD_AMPHOE: &str = "amphoe";
pub const FIELD_PROVINCE: &str = "province";
pub const FIELD_ZIPCODE: &str = "zipcode";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_PHONE_NUMBER: &str = "phoneNumber";
pub const FIELD_NUMBER_OF_SIGNERS: &str = "numberOfSigners";

/// Every text field a submission must carry, in form order.
pub const REQUIRED_FIELDS: &[&str] = &[
    FIELD_FIRST_NAME,
    FIELD_LAST_NAME,
    FIELD_ORGANIZATION_NAME,
    FIELD_ADDRESS_LINE1,
    FIELD_DISTRICT,
    FIELD_AMPHOE,
    FIELD_PROVINCE,
    FIELD_ZIPCODE,
    FIELD_TYPE,
    FIELD_PHONE_NUMBER,
    FIELD_NUMBER_OF_SIGNERS,
];

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

/// Ordering of list results by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse the `sort` query parameter. Only `"asc"` selects ascending;
    /// anything else, including a missing value, is descending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// SQL keyword for `ORDER BY`.
    pub fn sql_keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed fields
// ---------------------------------------------------------------------------

/// The non-image fields of a form return, validated and typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReturnFields {
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
}

impl FormReturnFields {
    /// Build from raw form values keyed by field name.
    ///
    /// Every name in [`REQUIRED_FIELDS`] must be present and non-blank. All
    /// missing names are reported together. `numberOfSigners` must parse as a
    /// non-negative integer. The phone number is stored trimmed so that
    /// uniqueness does not depend on surrounding whitespace.
    pub fn from_form(values: &HashMap<String, String>) -> Result<Self, CoreError> {
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|name| values.get(*name).map_or(true, |v| v.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let text = |name: &str| values.get(name).cloned().unwrap_or_default();

        Ok(Self {
            first_name: text(FIELD_FIRST_NAME),
            last_name: text(FIELD_LAST_NAME),
            organization_name: text(FIELD_ORGANIZATION_NAME),
            address_line1: text(FIELD_ADDRESS_LINE1),
            district: text(FIELD_DISTRICT),
            amphoe: text(FIELD_AMPHOE),
            province: text(FIELD_PROVINCE),
            zipcode: text(FIELD_ZIPCODE),
            region_type: text(FIELD_TYPE),
            phone_number: text(FIELD_PHONE_NUMBER).trim().to_string(),
            number_of_signers: parse_signer_count(&text(FIELD_NUMBER_OF_SIGNERS))?,
        })
    }

    /// The fields as `(form name, text value)` pairs, in form order.
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (FIELD_FIRST_NAME, self.first_name.clone()),
            (FIELD_LAST_NAME, self.last_name.clone()),
            (FIELD_ORGANIZATION_NAME, self.organization_name.clone()),
            (FIELD_ADDRESS_LINE1, self.address_line1.clone()),
            (FIELD_DISTRICT, self.district.clone()),
            (FIELD_AMPHOE, self.amphoe.clone()),
            (FIELD_PROVINCE, self.province.clone()),
            (FIELD_ZIPCODE, self.zipcode.clone()),
            (FIELD_TYPE, self.region_type.clone()),
            (FIELD_PHONE_NUMBER, self.phone_number.clone()),
            (FIELD_NUMBER_OF_SIGNERS, self.number_of_signers.to_string()),
        ]
    }
}

/// Parse the signer count from user text.
pub fn parse_signer_count(raw: &str) -> Result<i32, CoreError> {
    let value: i32 = raw.trim().parse().map_err(|_| {
        CoreError::Validation(format!(
            "{FIELD_NUMBER_OF_SIGNERS} must be a whole number, got '{raw}'"
        ))
    })?;
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{FIELD_NUMBER_OF_SIGNERS} must not be negative"
        )));
    }
    Ok(value)
}
