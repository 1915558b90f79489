//! Presence Coordination
//!
//! Maintains a live view of "who else is editing this document" and
//! broadcasts local typing activity, scoped to one document at a time.
//!
//! All state lives behind `&mut self` on a single-threaded event loop;
//! stale asynchronous callbacks after a teardown or scope change are
//! disambiguated by a generation counter rather than by locking.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::events::{ChannelEvent, TypingSignal, TYPING_EVENT};
use crate::scope::DocScope;
use crate::transport::{ChannelTransport, EventReceiver, TransportError};

/// The identity this coordinator broadcasts as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    pub id: String,
    pub name: String,
}

impl LocalIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Connection lifecycle of one coordinator instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not on any channel; carries the failure that got us here, if any
    Disconnected { reason: Option<String> },
    /// Subscription requested, waiting for the provider to confirm
    Connecting,
    /// Live on the presence channel
    Subscribed,
}

impl ConnectionState {
    pub fn is_subscribed(&self) -> bool {
        *self == ConnectionState::Subscribed
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Disconnected { reason: None }
    }
}

/// Handle returned by [`PresenceCoordinator::connect`]: the event stream
/// for the new channel plus the generation its events belong to.
#[derive(Debug)]
pub struct ChannelBinding {
    pub generation: u64,
    pub events: EventReceiver,
}

/// Tracks the other identities present on one document's channel.
pub struct PresenceCoordinator<T: ChannelTransport> {
    transport: T,
    identity: LocalIdentity,
    scope: Option<DocScope>,
    state: ConnectionState,
    /// Display names of the other editors, keyed by stable identity id
    members: HashMap<String, String>,
    /// Bumped on every connect and teardown; events from a replaced
    /// channel carry an older value and are discarded
    generation: u64,
}

impl<T: ChannelTransport> PresenceCoordinator<T> {
    pub fn new(identity: LocalIdentity, transport: T) -> Self {
        Self {
            transport,
            identity,
            scope: None,
            state: ConnectionState::default(),
            members: HashMap::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn identity(&self) -> &LocalIdentity {
        &self.identity
    }

    pub fn scope(&self) -> Option<&DocScope> {
        self.scope.as_ref()
    }

    /// Other editors currently on the channel, id -> display name
    pub fn members(&self) -> &HashMap<String, String> {
        &self.members
    }

    /// Display names for the "who's editing" indicator, sorted for a
    /// stable rendering order
    pub fn editor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.values().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Join the presence channel for `scope`.
    ///
    /// Any previous channel is torn down first; its in-flight events
    /// carry an older generation and will be discarded by [`apply`].
    ///
    /// [`apply`]: PresenceCoordinator::apply
    pub async fn connect(&mut self, scope: DocScope) -> Result<ChannelBinding, TransportError> {
        if self.scope.is_some() {
            self.teardown(None).await;
        }

        self.generation += 1;
        let generation = self.generation;
        let channel = scope.channel_name();

        self.scope = Some(scope);
        self.state = ConnectionState::Connecting;

        match self.transport.subscribe(&channel).await {
            Ok(events) => {
                debug!("subscribed to {} (generation {})", channel, generation);
                Ok(ChannelBinding { generation, events })
            }
            Err(e) => {
                self.scope = None;
                self.state = ConnectionState::Disconnected {
                    reason: Some(e.to_string()),
                };
                Err(e)
            }
        }
    }

    /// Switch to a different document, fully re-joining presence
    pub async fn set_scope(&mut self, scope: DocScope) -> Result<ChannelBinding, TransportError> {
        self.connect(scope).await
    }

    /// Replace the broadcast identity, re-joining the current scope if
    /// there is one
    pub async fn set_identity(
        &mut self,
        identity: LocalIdentity,
    ) -> Result<Option<ChannelBinding>, TransportError> {
        self.identity = identity;
        match self.scope.clone() {
            Some(scope) => self.connect(scope).await.map(Some),
            None => Ok(None),
        }
    }

    /// Apply one provider event delivered for `generation`.
    ///
    /// Teardown is asynchronous relative to in-flight events, so events
    /// from a torn-down or replaced channel are discarded here instead of
    /// mutating the new channel's membership.
    pub fn apply(&mut self, generation: u64, event: ChannelEvent) {
        if generation != self.generation {
            debug!(
                "discarding stale event (generation {} != {})",
                generation, self.generation
            );
            return;
        }

        match event {
            ChannelEvent::SubscriptionSucceeded { members } => {
                if self.state != ConnectionState::Connecting {
                    return;
                }
                self.members = members
                    .into_iter()
                    .filter(|m| m.id != self.identity.id)
                    .map(|m| (m.id, m.info.name))
                    .collect();
                self.state = ConnectionState::Subscribed;
            }
            ChannelEvent::MemberAdded(member) => {
                if !self.state.is_subscribed() || member.id == self.identity.id {
                    return;
                }
                // Insertion is idempotent: a redelivered add overwrites
                // the same entry
                self.members.insert(member.id, member.info.name);
            }
            ChannelEvent::MemberRemoved(member) => {
                if !self.state.is_subscribed() {
                    return;
                }
                // Removing an absent id is a no-op, not an error
                self.members.remove(&member.id);
            }
        }
    }

    /// Broadcast a typing signal for a local edit.
    ///
    /// Best-effort: unacknowledged, never retried, and a no-op unless the
    /// channel subscription is live.
    pub async fn notify_local_edit(&self) {
        if !self.state.is_subscribed() {
            return;
        }
        let Some(scope) = &self.scope else { return };

        let signal = TypingSignal {
            user_id: self.identity.id.clone(),
            user_name: self.identity.name.clone(),
        };
        let payload = match serde_json::to_value(&signal) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("typing signal encode failed: {}", e);
                return;
            }
        };

        if let Err(e) = self
            .transport
            .trigger(&scope.channel_name(), TYPING_EVENT, payload)
            .await
        {
            warn!("typing broadcast failed: {}", e);
        }
    }

    /// Leave the current channel and release the transport connection.
    ///
    /// Safe to call from any state, so teardown can run unconditionally
    /// even after an earlier failure.
    pub async fn disconnect(&mut self) {
        self.teardown(None).await;
    }

    async fn teardown(&mut self, reason: Option<String>) {
        // Invalidate in-flight events before the channel is released
        self.generation += 1;
        self.members.clear();

        if let Some(scope) = self.scope.take() {
            self.transport.unsubscribe(&scope.channel_name()).await;
        }
        self.transport.disconnect().await;

        self.state = ConnectionState::Disconnected { reason };
    }
}
