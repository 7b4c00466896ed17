use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header,
};

use crate::models::AddPieceForm;

type Pairs = Vec<(String, String)>;

/// Reads the submission fields from the body, then the query string.
///
/// Never rejects: a body that is missing, of another content type or
/// unreadable contributes no fields, and the handler sees empty values.
impl<S> FromRequest<S> for AddPieceForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req
            .uri()
            .query()
            .map(|query| parse_pairs(query.as_bytes()))
            .unwrap_or_default();

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let mut pairs = if content_type.starts_with("application/x-www-form-urlencoded") {
            match Bytes::from_request(req, state).await {
                Ok(body) => parse_pairs(&body),
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable form body");
                    Vec::new()
                }
            }
        } else if content_type.starts_with("multipart/form-data") {
            read_multipart(req, state).await
        } else {
            Vec::new()
        };

        // Body values take precedence over the query string
        pairs.extend(query);

        Ok(AddPieceForm::from_pairs(pairs))
    }
}

fn parse_pairs(raw: &[u8]) -> Pairs {
    serde_urlencoded::from_bytes::<Pairs>(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "malformed urlencoded form");
        Vec::new()
    })
}

// Text fields only; file parts are skipped
async fn read_multipart<S>(req: Request, state: &S) -> Pairs
where
    S: Send + Sync,
{
    let mut multipart = match Multipart::from_request(req, state).await {
        Ok(multipart) => multipart,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable multipart form");
            return Vec::new();
        }
    };

    let mut pairs = Vec::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.file_name().is_some() {
                    continue;
                }
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                match field.text().await {
                    Ok(value) => pairs.push((name, value)),
                    Err(e) => {
                        tracing::warn!(error = %e, "unreadable multipart field");
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "malformed multipart form");
                break;
            }
        }
    }

    pairs
}
