//! The 11x7 board and its fixed starting layout.
//!
//! A [`Board`] is an ordered list of [`Piece`]s whose coordinates all lie on
//! the grid. Nothing stops two pieces from sharing a square: there is no
//! rule layer yet, so overlap is left undefined rather than rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Piece, PieceKind};
use crate::BoardError;

/// Number of columns on the board.
pub const BOARD_WIDTH: u8 = 11;

/// Number of rows on the board.
pub const BOARD_HEIGHT: u8 = 7;

/// Columns of the four dogs on the bottom rank.
const DOG_COLUMNS: [u8; 4] = [3, 4, 6, 7];

/// Column of the chief on the bottom rank.
const CHIEF_COLUMN: u8 = 5;

/// The immutable board.
///
/// Serializes as its list of pieces. Deserializing goes through
/// [`Board::from_pieces`], so an out-of-bounds piece is rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Piece>", into = "Vec<Piece>")]
pub struct Board {
    pieces: Vec<Piece>,
}

/// Build the fixed starting layout.
///
/// Row 0 holds one buffalo per column. The bottom rank holds four dogs and
/// the chief between them. Pieces are ordered buffalo first (by column),
/// then dogs (by column), then the chief.
pub fn new_starting_board() -> Board {
    let bottom = BOARD_HEIGHT - 1;

    let mut pieces = Vec::with_capacity(BOARD_WIDTH as usize + DOG_COLUMNS.len() + 1);
    pieces.extend((0..BOARD_WIDTH).map(|column| Piece::new(PieceKind::Buffalo, column, 0)));
    pieces.extend(
        DOG_COLUMNS
            .iter()
            .map(|&column| Piece::new(PieceKind::Dog, column, bottom)),
    );
    pieces.push(Piece::new(PieceKind::Chief, CHIEF_COLUMN, bottom));

    Board { pieces }
}

impl Board {
    /// A board with no pieces. Still a full 11x7 grid.
    pub fn empty() -> Self {
        Self { pieces: Vec::new() }
    }

    /// Build a board from an arbitrary list of pieces.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] for the first piece whose
    /// coordinates fall outside the grid.
    pub fn from_pieces(pieces: Vec<Piece>) -> Result<Self, BoardError> {
        if let Some(bad) = pieces.iter().find(|p| !Self::contains(p.column, p.row)) {
            return Err(BoardError::OutOfBounds {
                column: bad.column,
                row: bad.row,
                width: BOARD_WIDTH,
                height: BOARD_HEIGHT,
            });
        }
        Ok(Self { pieces })
    }

    /// Number of columns.
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Number of rows.
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Whether `(column, row)` lies on the grid.
    pub fn contains(column: u8, row: u8) -> bool {
        column < BOARD_WIDTH && row < BOARD_HEIGHT
    }

    /// All pieces in placement order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The first piece (in placement order) standing on `(column, row)`.
    pub fn piece_at(&self, column: u8, row: u8) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is_at(column, row))
    }

    /// Number of pieces of the given kind.
    pub fn count(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|p| p.kind == kind).count()
    }

    /// Whether the board holds no pieces at all.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl Default for Board {
    /// Defaults to the starting layout.
    fn default() -> Self {
        new_starting_board()
    }
}

impl TryFrom<Vec<Piece>> for Board {
    type Error = BoardError;

    fn try_from(pieces: Vec<Piece>) -> Result<Self, Self::Error> {
        Self::from_pieces(pieces)
    }
}

impl From<Board> for Vec<Piece> {
    fn from(board: Board) -> Self {
        board.pieces
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}
