//! Outbound Email
//!
//! Placeholder integration: the delivery contract is in place but every
//! send fails `NotConfigured` until a real provider is wired in. No
//! retry, no queueing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email integration not configured")]
    NotConfigured,
}

/// One outbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub html: Option<String>,
}

/// Outbound email sender
pub struct MailSender;

impl MailSender {
    pub fn new() -> Self {
        Self
    }

    /// Send one message
    pub async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        info!(
            "[Mail] Would send to {}: {} ({} chars)",
            message.to,
            message.subject,
            message.body.len()
        );
        Err(MailError::NotConfigured)
    }
}

impl Default for MailSender {
    fn default() -> Self {
        Self::new()
    }
}
