//! Form return API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! upload storage) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod form_data;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
pub mod uploads;
