//! Compact row notation for boards.
//!
//! Rows are written top (row 0) to bottom and joined with `/`. Each row has
//! one token per column: the piece letter (`B`, `C`, `D`) or `.` for an empty
//! square. The starting board reads:
//!
//! ```text
//! BBBBBBBBBBB/.........../.........../.........../.........../.........../...DDCDD...
//! ```
//!
//! A square holding several pieces shows only the first one, so notation is
//! lossless only for boards without overlap.

use std::str::FromStr;

use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::piece::{Piece, PieceKind};
use crate::BoardError;

/// Separator between rows.
const ROW_SEPARATOR: char = '/';

/// Token for an empty square.
const EMPTY: char = '.';

impl Board {
    /// Write the board in row notation.
    pub fn to_notation(&self) -> String {
        let mut out = String::with_capacity((BOARD_WIDTH as usize + 1) * BOARD_HEIGHT as usize);
        for row in 0..BOARD_HEIGHT {
            if row > 0 {
                out.push(ROW_SEPARATOR);
            }
            for column in 0..BOARD_WIDTH {
                let token = self
                    .piece_at(column, row)
                    .map_or(EMPTY, |piece| piece.kind.letter());
                out.push(token);
            }
        }
        out
    }

    /// Parse a board from row notation.
    ///
    /// Pieces come out in reading order: row by row, left to right.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] when the row count or a row width is wrong,
    /// or when a token is not a piece letter or `.`.
    pub fn from_notation(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = text.trim().split(ROW_SEPARATOR).collect();
        if rows.len() != BOARD_HEIGHT as usize {
            return Err(BoardError::RowCount {
                expected: BOARD_HEIGHT as usize,
                found: rows.len(),
            });
        }

        let mut pieces = Vec::new();
        for (row, tokens) in rows.iter().enumerate() {
            let width = tokens.chars().count();
            if width != BOARD_WIDTH as usize {
                return Err(BoardError::RowWidth {
                    row,
                    expected: BOARD_WIDTH as usize,
                    found: width,
                });
            }

            for (column, token) in tokens.chars().enumerate() {
                if token == EMPTY {
                    continue;
                }
                let kind = PieceKind::from_letter(token)
                    .ok_or(BoardError::UnknownToken { token, column, row })?;
                // Both indices are bounded by the width/height checks above.
                pieces.push(Piece::new(kind, column as u8, row as u8));
            }
        }

        Board::from_pieces(pieces)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::new_starting_board;

    const STARTING: &str =
        "BBBBBBBBBBB/.........../.........../.........../.........../.........../...DDCDD...";

    #[test]
    fn starting_board_notation() {
        assert_eq!(new_starting_board().to_notation(), STARTING);
        assert_eq!(new_starting_board().to_string(), STARTING);
    }

    #[test]
    fn empty_board_notation() {
        let text = Board::empty().to_notation();
        assert_eq!(text.split('/').count(), 7);
        assert!(text.chars().all(|c| c == '.' || c == '/'));
    }

    #[test]
    fn parse_starting_board_keeps_squares() {
        let parsed: Board = STARTING.parse().unwrap();
        assert_eq!(parsed.pieces().len(), 16);
        assert_eq!(parsed.to_notation(), STARTING);
        assert_eq!(parsed.piece_at(5, 6).map(|p| p.kind), Some(PieceKind::Chief));
    }

    #[test]
    fn parse_rejects_wrong_row_count() {
        let err = Board::from_notation("BBBBBBBBBBB/...........").unwrap_err();
        assert_eq!(
            err,
            BoardError::RowCount {
                expected: 7,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_short_row() {
        let text = "BBBBBBBBBB/.........../.........../.........../.........../.........../...........";
        let err = Board::from_notation(text).unwrap_err();
        assert_eq!(
            err,
            BoardError::RowWidth {
                row: 0,
                expected: 11,
                found: 10
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_token() {
        let text = "BBBBBBBBBBB/.........../....K....../.........../.........../.........../...........";
        let err = Board::from_notation(text).unwrap_err();
        assert_eq!(
            err,
            BoardError::UnknownToken {
                token: 'K',
                column: 4,
                row: 2
            }
        );
    }
}
