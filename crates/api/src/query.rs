//! Query-string parameters.

use formreturn_core::form_return::SortDirection;
use serde::Deserialize;

/// `GET /api/records?search=&sort=`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-sensitive substring of first or last name.
    pub search: Option<String>,
    /// `asc` for oldest first; anything else is newest first.
    pub sort: Option<String>,
}

impl ListParams {
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn direction(&self) -> SortDirection {
        SortDirection::from_param(self.sort.as_deref())
    }
}

/// `GET /api/records/check-phone?phoneNumber=`
#[derive(Debug, Default, Deserialize)]
pub struct PhoneCheckParams {
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: String,
}
