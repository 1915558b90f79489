//! Channel Authorization Signing
//!
//! Implements the realtime provider's token format: the relay proves to
//! the provider that an identity may join a restricted channel by
//! returning an HMAC-SHA256 signature over the subscription attempt.
//! Presence channels additionally embed the member data the provider
//! redistributes to other subscribers.

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use thiserror::Error;

use crate::config::RelayConfig;
use crate::core::session::Identity;

type HmacSha256 = Hmac<Sha256>;

/// Failures reported by the signing primitive
#[derive(Debug, Error)]
pub enum SignError {
    #[error("invalid socket id: {0}")]
    InvalidSocketId(String),
    #[error("channel {0} does not require authorization")]
    ChannelNotRestricted(String),
    #[error("failed to encode member data: {0}")]
    MemberData(#[from] serde_json::Error),
}

/// Signed authorization payload, returned to the client verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationToken {
    pub auth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<String>,
}

/// Member data embedded in a presence-channel token
#[derive(Debug, Serialize)]
struct ChannelData<'a> {
    user_id: &'a str,
    user_info: UserInfo<'a>,
}

#[derive(Debug, Serialize)]
struct UserInfo<'a> {
    name: &'a str,
    email: &'a str,
}

/// Signs channel subscription attempts with the provider secret.
///
/// Stateless: every token is a pure function of the
/// (socket, channel, identity) triple and the static credentials, so
/// repeated calls each yield an independently usable token.
pub struct ChannelAuthorizer {
    key: String,
    secret: String,
}

impl ChannelAuthorizer {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            key: config.key.clone(),
            secret: config.secret.clone(),
        }
    }

    /// Authorize `identity` to join `channel_name` on connection `socket_id`
    pub fn authorize(
        &self,
        socket_id: &str,
        channel_name: &str,
        identity: &Identity,
    ) -> Result<AuthorizationToken, SignError> {
        if !is_valid_socket_id(socket_id) {
            return Err(SignError::InvalidSocketId(socket_id.to_string()));
        }

        if channel_name.starts_with("presence-") {
            let data = serde_json::to_string(&ChannelData {
                user_id: &identity.id,
                user_info: UserInfo {
                    name: identity.display_name(),
                    email: &identity.email,
                },
            })?;
            let auth = self.sign(&format!("{socket_id}:{channel_name}:{data}"));
            Ok(AuthorizationToken {
                auth,
                channel_data: Some(data),
            })
        } else if channel_name.starts_with("private-") {
            let auth = self.sign(&format!("{socket_id}:{channel_name}"));
            Ok(AuthorizationToken {
                auth,
                channel_data: None,
            })
        } else {
            Err(SignError::ChannelNotRestricted(channel_name.to_string()))
        }
    }

    fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(message.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        format!("{}:{}", self.key, signature)
    }
}

/// Socket ids are issued by the provider as `<digits>.<digits>`
fn is_valid_socket_id(socket_id: &str) -> bool {
    match socket_id.split_once('.') {
        Some((left, right)) => {
            !left.is_empty()
                && !right.is_empty()
                && left.bytes().all(|b| b.is_ascii_digit())
                && right.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
