//! Cowrite Presence
//!
//! Client side of the collaborative note editor: joins a per-document
//! presence channel, tracks which other identities are currently editing,
//! and broadcasts ephemeral typing signals on local edits.
//!
//! The realtime transport itself is external. Implement
//! [`ChannelTransport`] over the provider SDK, then feed the events it
//! delivers back through [`PresenceCoordinator::apply`] together with the
//! generation from the [`ChannelBinding`] the subscription returned:
//!
//! ```no_run
//! # use cowrite_presence::*;
//! # async fn example<T: ChannelTransport>(transport: T) -> Result<(), TransportError> {
//! let mut coordinator = PresenceCoordinator::new(
//!     LocalIdentity::new("u1", "Ana"),
//!     transport,
//! );
//!
//! let mut binding = coordinator.connect(DocScope::note("42")).await?;
//! while let Some(event) = binding.events.recv().await {
//!     coordinator.apply(binding.generation, event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coordinator;
pub mod events;
pub mod scope;
pub mod transport;

pub use config::ClientConfig;
pub use coordinator::{ChannelBinding, ConnectionState, LocalIdentity, PresenceCoordinator};
pub use events::{ChannelEvent, Member, MemberInfo, TypingSignal, TYPING_EVENT};
pub use scope::DocScope;
pub use transport::{ChannelTransport, EventReceiver, TransportError};
