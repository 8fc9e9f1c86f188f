//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /api/records
//!   POST   /api/records
//!   PUT    /api/records/:id
//!   DELETE /api/records/:id
//!   GET    /api/records/worker/:name
//!   GET    /api/finished-status
//!   POST   /api/finished-status
//!   GET    /health
//!
//! Anything else falls through to the static frontend directory, when one is
//! configured.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use db::Store;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::AppState;

use handlers::{finished_status, health, records};

/// Build the full application router.
pub fn router(state: AppState, public_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/health", get(health::check))
        .route("/api/records", get(records::list).post(records::create))
        .route("/api/records/:id", put(records::update).delete(records::delete))
        .route("/api/records/worker/:name", get(records::list_by_worker))
        .route(
            "/api/finished-status",
            get(finished_status::get_all).post(finished_status::set),
        )
        .with_state(state);

    let app = match public_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(
    bind: &str,
    store: Arc<dyn Store>,
    public_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    let app = router(AppState::new(store), public_dir);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        // No signal handler means no graceful shutdown; keep serving.
        Err(_) => std::future::pending::<()>().await,
    }
}
