//! Client-side Provider Configuration

/// Default network region for the realtime provider
const DEFAULT_CLUSTER: &str = "us2";

/// Connection settings a transport implementation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Client-visible application key
    pub key: String,
    /// Provider network region
    pub cluster: String,
}

impl ClientConfig {
    /// Read provider settings from the process environment.
    ///
    /// Prefers the client-visible names (`NEXT_PUBLIC_PUSHER_KEY`,
    /// `NEXT_PUBLIC_PUSHER_CLUSTER`) and falls back to the server-side
    /// equivalents. Returns `None` when no key is configured.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let pick = |public: &str, fallback: &str| {
            get(public)
                .filter(|value| !value.is_empty())
                .or_else(|| get(fallback).filter(|value| !value.is_empty()))
        };

        let key = pick("NEXT_PUBLIC_PUSHER_KEY", "PUSHER_KEY")?;
        let cluster = pick("NEXT_PUBLIC_PUSHER_CLUSTER", "PUSHER_CLUSTER")
            .unwrap_or_else(|| DEFAULT_CLUSTER.to_string());

        Some(Self { key, cluster })
    }
}
