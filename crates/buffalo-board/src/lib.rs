//! Buffalo board model -- the fixed 11x7 grid and its starting pieces.
//!
//! The board is built once at startup and never mutated afterwards. There are
//! no move rules here: the crate only knows where pieces stand and how to
//! write a board down as a compact row notation.
//!
//! # Quick Start
//!
//! ```
//! use buffalo_board::prelude::*;
//!
//! let board = new_starting_board();
//! assert_eq!(board.pieces().len(), 16);
//! assert_eq!(board.count(PieceKind::Buffalo), 11);
//! assert_eq!(
//!     board.piece_at(5, 6).map(|p| p.kind),
//!     Some(PieceKind::Chief)
//! );
//! ```

#![deny(unsafe_code)]

pub mod board;
pub mod notation;
pub mod piece;

pub use board::new_starting_board;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when building or parsing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A piece was placed outside the 11x7 grid.
    #[error("piece at ({column}, {row}) lies outside the {width}x{height} board")]
    OutOfBounds {
        column: u8,
        row: u8,
        width: u8,
        height: u8,
    },

    /// The notation did not contain one segment per board row.
    #[error("notation has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    /// A notation row did not contain one token per board column.
    #[error("notation row {row} has {found} squares, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A notation token is neither `.` nor a piece letter.
    #[error("unknown piece token '{token}' at column {column}, row {row}")]
    UnknownToken { token: char, column: usize, row: usize },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::board::{new_starting_board, Board, BOARD_HEIGHT, BOARD_WIDTH};
    pub use crate::piece::{Piece, PieceKind, Side};
    pub use crate::BoardError;
}
