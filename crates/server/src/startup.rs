use std::path::Path;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;
use service::{
    file::{catalog_store::CatalogStore, order_store::OrderStore},
    runtime,
};

pub const PRODUCTS_FILE: &str = "products.json";
pub const ORDERS_FILE: &str = "orders.json";

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

/// Cross-origin requests are accepted from anywhere.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Create the data directory and both array files if needed, then open the stores.
pub async fn build_state(data_dir: &Path) -> Result<ServerState, StartupError> {
    runtime::ensure_env(data_dir).await?;

    let catalog = CatalogStore::new(data_dir.join(PRODUCTS_FILE)).await?;
    let orders = OrderStore::new(data_dir.join(ORDERS_FILE), catalog.clone()).await?;

    Ok(ServerState { catalog, orders })
}

/// Router with CORS and tracing layers, ready to serve.
pub async fn build_app(data_dir: &Path) -> Result<Router, StartupError> {
    let state = build_state(data_dir).await?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: load configuration, build the app and run the HTTP server
/// until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg.storage.data_dir).await?;

    let addr = cfg.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, data_dir = %cfg.storage.data_dir.display(), "Serveur démarré sur le port {}", addr.port());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}
