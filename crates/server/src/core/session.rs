//! Session Lookup
//!
//! The identity provider itself is external; the relay only needs to
//! resolve a bearer token to the identity that owns it. `SessionStore` is
//! the in-process implementation backing tests and single-binary
//! deployments; production substitutes its own [`IdentityLookup`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// An authenticated user as the identity provider reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            email: email.into(),
        }
    }

    /// Name shown to collaborators, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Resolves a bearer token to the identity that owns it
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn current_user(&self, token: &str) -> Option<Identity>;
}

/// Session record held for an issued token
#[derive(Debug, Clone)]
struct Session {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

/// In-memory token -> identity map
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh token for an identity
    pub async fn issue(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().to_string();
        self.insert(token.clone(), identity).await;
        token
    }

    /// Register an externally issued token
    pub async fn insert(&self, token: String, identity: Identity) {
        let session = Session {
            identity,
            expires_at: Utc::now() + chrono::Duration::days(30),
        };
        self.sessions.write().await.insert(token, session);
    }

    /// Invalidate a token
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
        info!("[Session] Session invalidated");
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityLookup for SessionStore {
    async fn current_user(&self, token: &str) -> Option<Identity> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token)?;
        if session.expires_at <= Utc::now() {
            return None;
        }
        Some(session.identity.clone())
    }
}
