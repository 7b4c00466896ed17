use std::num::ParseIntError;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures reported by a piece store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Piece {id} has an unreadable date")]
    InvalidDate { id: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid quantity {input:?}: {source}")]
    InvalidQuantity {
        input: String,
        source: ParseIntError,
    },
}

/// Plain-text 500 carrying the given error lines, one per line.
pub fn error_response(messages: &[String]) -> Response {
    let mut body = String::new();
    for message in messages {
        body.push_str(message);
        body.push('\n');
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        body,
    )
        .into_response()
}

// Every handler failure surfaces as a 500 with the error text as body
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        error_response(&[self.to_string()])
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
