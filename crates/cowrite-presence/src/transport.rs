//! Transport Seam
//!
//! The realtime connection is owned by an external provider SDK; the
//! coordinator talks to it through this trait so tests can inject an
//! in-memory fake.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::events::ChannelEvent;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("subscription to {channel} refused: {reason}")]
    SubscriptionRefused { channel: String, reason: String },
    #[error("transport connection failed: {0}")]
    Connection(String),
    #[error("trigger failed: {0}")]
    Trigger(String),
}

/// Receiver side of a channel subscription
pub type EventReceiver = mpsc::UnboundedReceiver<ChannelEvent>;

/// Connection to the realtime provider's network.
///
/// One coordinator instance exclusively owns one transport at a time.
/// `unsubscribe` and `disconnect` must be idempotent: teardown runs
/// unconditionally, including after a failed or never-completed
/// subscription.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    /// Subscribe to a channel; membership events arrive on the receiver
    async fn subscribe(&self, channel: &str) -> Result<EventReceiver, TransportError>;

    /// Fire a client event to the other subscribers of a channel
    async fn trigger(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), TransportError>;

    /// Drop the subscription to a channel
    async fn unsubscribe(&self, channel: &str);

    /// Tear down the underlying connection
    async fn disconnect(&self);
}

#[async_trait]
impl<T: ChannelTransport + ?Sized> ChannelTransport for Arc<T> {
    async fn subscribe(&self, channel: &str) -> Result<EventReceiver, TransportError> {
        (**self).subscribe(channel).await
    }

    async fn trigger(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), TransportError> {
        (**self).trigger(channel, event, payload).await
    }

    async fn unsubscribe(&self, channel: &str) {
        (**self).unsubscribe(channel).await
    }

    async fn disconnect(&self) {
        (**self).disconnect().await
    }
}
