use crate::core::error::{Error, Result};
use crate::core::session::Identity;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Authenticated request context, populated by the session middleware.
#[derive(Clone, Debug)]
pub struct Ctx {
    identity: Identity,
}

impl Ctx {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user_id(&self) -> &str {
        &self.identity.id
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::AuthFailCtxNotInRequestExt)
    }
}
