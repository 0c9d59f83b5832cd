//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO for in-place replacement

pub mod form_return;
