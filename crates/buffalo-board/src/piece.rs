//! Piece kinds and placed pieces.

use serde::{Deserialize, Serialize};

/// The side a piece plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The herd crossing the board from the top rank.
    Buffalo,
    /// The chief and his dogs defending the bottom rank.
    Hunters,
}

/// What a piece is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Buffalo,
    Chief,
    Dog,
}

impl PieceKind {
    /// All kinds, in notation order.
    pub const ALL: [PieceKind; 3] = [PieceKind::Buffalo, PieceKind::Chief, PieceKind::Dog];

    /// The single-letter token used in board notation and piece labels.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Buffalo => 'B',
            PieceKind::Chief => 'C',
            PieceKind::Dog => 'D',
        }
    }

    /// Inverse of [`letter`](Self::letter). Returns `None` for any other
    /// character, including lowercase letters.
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.letter() == letter)
    }

    /// The side that owns pieces of this kind.
    pub fn side(self) -> Side {
        match self {
            PieceKind::Buffalo => Side::Buffalo,
            PieceKind::Chief | PieceKind::Dog => Side::Hunters,
        }
    }
}

/// A piece standing on a square.
///
/// Columns count from the left edge, rows from the top rank (row 0 is where
/// the buffalo start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub column: u8,
    pub row: u8,
}

impl Piece {
    pub const fn new(kind: PieceKind, column: u8, row: u8) -> Self {
        Self { kind, column, row }
    }

    /// Whether this piece stands on `(column, row)`.
    pub fn is_at(&self, column: u8, row: u8) -> bool {
        self.column == column && self.row == row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
        }
    }

    #[test]
    fn unknown_letters_are_rejected() {
        assert_eq!(PieceKind::from_letter('b'), None);
        assert_eq!(PieceKind::from_letter('.'), None);
        assert_eq!(PieceKind::from_letter('K'), None);
    }

    #[test]
    fn chief_and_dogs_hunt_together() {
        assert_eq!(PieceKind::Buffalo.side(), Side::Buffalo);
        assert_eq!(PieceKind::Chief.side(), Side::Hunters);
        assert_eq!(PieceKind::Dog.side(), Side::Hunters);
    }
}
