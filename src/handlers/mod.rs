pub mod context;
pub mod piece;
pub mod submission;

pub use context::RequestContext;
pub use piece::{AppState, LISTING_LIMIT, add_piece, list_pieces};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_pieces))
        .route("/add", post(add_piece))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
