//! Domain logic for form return records.
//!
//! Nothing in here touches the network or the database: field parsing,
//! upload naming rules, the region prefix index, image compression and the
//! form editing state machine are all plain synchronous code.

pub mod error;
pub mod form_editor;
pub mod form_return;
pub mod image_compression;
pub mod regions;
pub mod types;
pub mod upload;
