pub mod piece;

pub use piece::{AddPieceForm, Piece, PieceId};
