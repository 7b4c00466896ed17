use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single item in a delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Identity of the submitting caller, empty when anonymous
    pub added_by: String,
    pub description: String,
    pub quantity: i64,
    /// Assigned by the server when the piece is written
    pub date: DateTime<Utc>,
}

impl Piece {
    pub fn new(description: String, quantity: i64, date: DateTime<Utc>) -> Self {
        Self {
            added_by: String::new(),
            description,
            quantity,
            date,
        }
    }
}

/// Identifier generated for every stored piece
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub String);

impl PieceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields posted to `/add`. Missing fields read as empty strings and the
/// first value wins when a field repeats.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddPieceForm {
    pub description: String,
    pub quantity: String,
}

impl AddPieceForm {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut description = None;
        let mut quantity = None;

        for (name, value) in pairs {
            match name.as_str() {
                "description" if description.is_none() => description = Some(value),
                "quantity" if quantity.is_none() => quantity = Some(value),
                _ => {}
            }
        }

        Self {
            description: description.unwrap_or_default(),
            quantity: quantity.unwrap_or_default(),
        }
    }
}
