use std::sync::Arc;

use formreturn_db::store::SharedStore;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store, chosen at startup.
    pub store: SharedStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Writes uploaded images below the public directory.
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Assemble state; uploads land in `<config.public_dir>/images`.
    pub fn new(store: SharedStore, config: ServerConfig) -> Self {
        let uploads = UploadStore::new(&config.public_dir);
        Self {
            store,
            config: Arc::new(config),
            uploads: Arc::new(uploads),
        }
    }
}
