//! Channel authorization endpoint
//!
//! Exchanges an authenticated (socket, channel) pair for a signed token
//! from the realtime provider. The relay holds no state between calls;
//! every request yields an independently usable token.

use axum::{extract::State, Form, Json};
use serde::Deserialize;
use tracing::{error, info};

use crate::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::{Error, Result};
use crate::signer::AuthorizationToken;

/// Form body of the provider's client auth callback
#[derive(Debug, Deserialize)]
pub struct ChannelAuthRequest {
    pub socket_id: Option<String>,
    pub channel_name: Option<String>,
}

/// POST /pusher/auth
pub async fn authorize_channel(
    State(state): State<AppState>,
    ctx: Ctx,
    Form(req): Form<ChannelAuthRequest>,
) -> Result<Json<AuthorizationToken>> {
    let socket_id = req
        .socket_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(Error::MissingParams)?;
    let channel_name = req
        .channel_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(Error::MissingParams)?;

    info!(
        "POST /pusher/auth - {} requests {}",
        ctx.user_id(),
        channel_name
    );

    match state
        .authorizer
        .authorize(socket_id, channel_name, ctx.identity())
    {
        Ok(token) => Ok(Json(token)),
        Err(e) => {
            error!("[Relay] Channel authorization failed: {}", e);
            Err(Error::Provider(e.to_string()))
        }
    }
}
