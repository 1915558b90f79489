//! Core Router
//!
//! The authorization endpoint sits behind the session middleware; the
//! health check does not.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::core::middleware::mw_require_auth;
use crate::relay::authorize_channel;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pusher/auth", post(authorize_channel))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw_require_auth,
        ))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK - Cowrite Relay"
}
