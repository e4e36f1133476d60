//! HTTP API for the tagging service.
//!
//! Exposes a health check at `/` and the tag endpoints under `/tags`.
//! Every response body is a JSON object with a `status` field.
//!
//! Built on Axum; the tag store is injected through router state.

pub mod body;
pub mod envelope;
pub mod error;
pub mod tags;

use axum::extract::DefaultBodyLimit;
use axum::{Router, response::Json, routing::get};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use envelope::Envelope;
use tagging_config::AppConfig;
use tagging_core::TagStore;

/// Request body limit (1 MB).
const BODY_LIMIT: usize = 1024 * 1024;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub store: Arc<dyn TagStore>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .merge(tags::tags_router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the HTTP server described by `config` and run until Ctrl-C.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.server.bind_addr();
    let store = tagging_store::build_from_config(&config);

    let listener = TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        backend = store.name(),
        "Tagging Microservice running on http://{addr}"
    );

    serve(listener, store, shutdown_signal()).await?;
    info!("Tagging Microservice stopped");
    Ok(())
}

/// Serve the API on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<dyn TagStore>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(Arc::new(GatewayState { store }));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown signal received");
}

async fn health_handler() -> Json<Envelope<()>> {
    Json(Envelope::ok("Tagging Microservice is running"))
}
