use async_trait::async_trait;
use axum::http::HeaderName;

use crate::handlers::RequestContext;

/// Identity collaborator: who, if anyone, is making the request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_identity(&self, ctx: &RequestContext) -> Option<String>;
}

/// Reads the caller identity from a header set by the identity service in
/// front of this server. The header must never be accepted from clients
/// directly.
pub struct HeaderIdentityProvider {
    header: HeaderName,
}

impl HeaderIdentityProvider {
    pub fn new(header: &str) -> Result<Self, IdentityError> {
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|_| IdentityError::InvalidHeader(header.to_string()))?;

        Ok(Self { header })
    }
}

#[async_trait]
impl IdentityProvider for HeaderIdentityProvider {
    async fn current_identity(&self, ctx: &RequestContext) -> Option<String> {
        let value = ctx.headers.get(&self.header)?;

        match value.to_str() {
            Ok(identity) if !identity.trim().is_empty() => Some(identity.to_string()),
            Ok(_) => None,
            Err(_) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    "ignoring non-ASCII identity header"
                );
                None
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid identity header name: {0}")]
    InvalidHeader(String),
}
