//! Relay configuration

use std::sync::Arc;

use anyhow::Context;

use crate::core::session::IdentityLookup;
use crate::signer::ChannelAuthorizer;

/// Default network region for the realtime provider
const DEFAULT_CLUSTER: &str = "us2";
/// Default port the relay listens on
const DEFAULT_PORT: u16 = 3001;

/// Credentials and network settings for the realtime provider
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Provider application id
    pub app_id: String,
    /// Client-visible application key
    pub key: String,
    /// Signing secret; never leaves the server
    pub secret: String,
    /// Provider network region
    pub cluster: String,
    /// Port the relay listens on
    pub port: u16,
}

impl RelayConfig {
    /// Read configuration from the process environment.
    ///
    /// `PUSHER_APP_ID`, `PUSHER_KEY` and `PUSHER_SECRET` are required;
    /// `PUSHER_CLUSTER` defaults to `us2` and `PORT` to 3001.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let require = |name: &str| {
            get(name)
                .filter(|value| !value.is_empty())
                .with_context(|| format!("{name} is not set"))
        };

        let port = match get("PORT").filter(|value| !value.is_empty()) {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid PORT value: {value}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            app_id: require("PUSHER_APP_ID")?,
            key: require("PUSHER_KEY")?,
            secret: require("PUSHER_SECRET")?,
            cluster: get("PUSHER_CLUSTER")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
            port,
        })
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub sessions: Arc<dyn IdentityLookup>,
    pub authorizer: Arc<ChannelAuthorizer>,
}

impl AppState {
    pub fn new(config: RelayConfig, sessions: Arc<dyn IdentityLookup>) -> Self {
        let authorizer = Arc::new(ChannelAuthorizer::new(&config));
        Self {
            config,
            sessions,
            authorizer,
        }
    }
}
