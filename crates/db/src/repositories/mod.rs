//! SQL repositories, one per table.

mod form_return_repo;

pub use form_return_repo::{FormReturnRepo, PHONE_NUMBER_CONSTRAINT};
