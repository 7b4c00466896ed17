use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use uuid::Uuid;

/// Per-request values handed to collaborators explicitly
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub headers: HeaderMap,
}

impl RequestContext {
    pub fn new(headers: HeaderMap) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            headers,
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(parts.headers.clone()))
    }
}
