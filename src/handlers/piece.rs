use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::{
    clock::Clock,
    db::{PieceStore, SortOrder},
    error::{AppError, Result, error_response},
    handlers::RequestContext,
    models::{AddPieceForm, Piece},
    services::{IdentityProvider, PageRenderer},
};

/// Most pieces the listing page ever shows
pub const LISTING_LIMIT: usize = 10;

/// State shared by the piece handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PieceStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub renderer: Arc<PageRenderer>,
    pub clock: Arc<dyn Clock>,
    /// Group all pieces are read from and written to
    pub piece_group: String,
}

/// Render the newest pieces of the group
pub async fn list_pieces(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Html<String>> {
    let pieces = state
        .store
        .query(&state.piece_group, SortOrder::DateDescending, LISTING_LIMIT)
        .await?;

    tracing::debug!(
        request_id = %ctx.request_id,
        count = pieces.len(),
        "rendering piece listing"
    );

    let page = state.renderer.render_listing(&pieces)?;
    Ok(Html(page))
}

/// Store a submitted piece and send the caller back to the listing.
///
/// A quantity that does not parse is reported as a 500, yet the piece is
/// still written with a quantity of 0.
pub async fn add_piece(
    State(state): State<AppState>,
    ctx: RequestContext,
    form: AddPieceForm,
) -> Response {
    let mut failures = Vec::new();

    let quantity = match parse_quantity(&form.quantity) {
        Ok(quantity) => quantity,
        Err(e) => {
            tracing::error!(request_id = %ctx.request_id, error = %e, "invalid quantity");
            failures.push(e.to_string());
            0
        }
    };

    let mut piece = Piece::new(form.description, quantity, state.clock.now());
    if let Some(identity) = state.identity.current_identity(&ctx).await {
        piece.added_by = identity;
    }

    match state.store.insert(&state.piece_group, &piece).await {
        Ok(id) => {
            tracing::info!(
                request_id = %ctx.request_id,
                piece_id = %id,
                group = %state.piece_group,
                "stored piece"
            );
        }
        Err(e) => {
            let e = AppError::from(e);
            tracing::error!(request_id = %ctx.request_id, error = %e, "failed to store piece");
            failures.push(e.to_string());
            return error_response(&failures);
        }
    }

    if !failures.is_empty() {
        return error_response(&failures);
    }

    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Base-10 signed 64-bit quantity
pub fn parse_quantity(raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|source| AppError::InvalidQuantity {
        input: raw.to_string(),
        source,
    })
}
