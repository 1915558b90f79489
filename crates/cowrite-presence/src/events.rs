//! Channel Event Model
//!
//! The provider SDK delivers untyped payloads; the coordinator consumes
//! them as tagged records so a fake transport can stand in during tests.

use serde::{Deserialize, Serialize};

/// Info block the provider attaches to a presence member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
}

/// One identity present on a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub info: MemberInfo,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            info: MemberInfo { name: name.into() },
        }
    }
}

/// Membership events the provider delivers for a subscribed channel.
///
/// Delivery is assumed FIFO per channel but not exactly-once; the
/// consumer treats add/remove as idempotent set operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Subscription established; carries the full current member list
    SubscriptionSucceeded { members: Vec<Member> },
    /// A member joined the channel
    MemberAdded(Member),
    /// A member left the channel
    MemberRemoved(Member),
}

/// Client event name used for typing broadcasts
pub const TYPING_EVENT: &str = "client-typing";

/// Ephemeral typing signal broadcast to the other subscribers on every
/// local edit. Unpersisted; consumed immediately by peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingSignal {
    pub user_id: String,
    pub user_name: String,
}
