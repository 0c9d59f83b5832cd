use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formreturn_api::config::ServerConfig;
use formreturn_api::router::build_app_router;
use formreturn_api::state::AppState;
use formreturn_db::store::{MemoryFormReturnStore, PgFormReturnStore, SharedStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formreturn_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        public_dir = %config.public_dir.display(),
        "Loaded server configuration"
    );

    // --- Store ---
    let store: SharedStore = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = formreturn_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            formreturn_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            formreturn_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgFormReturnStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory only");
            Arc::new(MemoryFormReturnStore::new())
        }
    };

    // --- App state ---
    let state = AppState::new(store, config.clone());
    tokio::fs::create_dir_all(state.uploads.dir())
        .await
        .expect("Failed to create upload directory");

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
