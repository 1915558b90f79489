//! Cowrite Collaboration Relay
//!
//! Server side of the collaborative note editor: validates the caller's
//! session and exchanges a (socket, channel) pair for a signed
//! authorization token from the realtime provider. Presence tracking and
//! message delivery are owned by the provider; the relay holds no state
//! between requests.

pub mod config;
pub mod core;
pub mod mail;
pub mod relay;
pub mod signer;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppState, RelayConfig};
use crate::core::session::SessionStore;

pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    info!("=== Cowrite Relay ===");

    let config = RelayConfig::from_env()?;
    info!(
        "Provider app {} on cluster {}",
        config.app_id, config.cluster
    );

    // Sessions are seeded by the embedding deployment; the relay itself
    // has no signup surface.
    let sessions = Arc::new(SessionStore::new());
    let state = AppState::new(config.clone(), sessions);

    let app = crate::core::router(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
