//! Tests for the starting layout and board queries.

use buffalo_board::prelude::*;

// ---------------------------------------------------------------------------
// 1. Starting layout
// ---------------------------------------------------------------------------

#[test]
fn starting_board_has_sixteen_pieces() {
    let board = new_starting_board();
    assert_eq!(board.pieces().len(), 16);
    assert_eq!(board.count(PieceKind::Buffalo), 11);
    assert_eq!(board.count(PieceKind::Chief), 1);
    assert_eq!(board.count(PieceKind::Dog), 4);
}

#[test]
fn starting_buffalo_fill_the_top_rank() {
    let board = new_starting_board();
    for column in 0..BOARD_WIDTH {
        let piece = board
            .piece_at(column, 0)
            .unwrap_or_else(|| panic!("column {column} of row 0 should hold a buffalo"));
        assert_eq!(piece.kind, PieceKind::Buffalo);
    }
    assert!(board
        .pieces()
        .iter()
        .filter(|p| p.kind == PieceKind::Buffalo)
        .all(|p| p.row == 0));
}

#[test]
fn starting_hunters_stand_on_the_bottom_rank() {
    let board = new_starting_board();
    let bottom = BOARD_HEIGHT - 1;

    assert_eq!(board.piece_at(5, bottom).map(|p| p.kind), Some(PieceKind::Chief));
    for column in [3, 4, 6, 7] {
        assert_eq!(
            board.piece_at(column, bottom).map(|p| p.kind),
            Some(PieceKind::Dog),
            "expected a dog at column {column}"
        );
    }
    for piece in board.pieces().iter().filter(|p| p.kind.side() == Side::Hunters) {
        assert_eq!(piece.row, bottom, "{piece:?} should be on the bottom rank");
    }
}

#[test]
fn starting_board_is_identical_across_calls() {
    let first = new_starting_board();
    for _ in 0..10 {
        assert_eq!(new_starting_board(), first);
    }
}

#[test]
fn starting_board_pieces_are_in_bounds() {
    let board = new_starting_board();
    assert!(board.pieces().iter().all(|p| Board::contains(p.column, p.row)));
}

#[test]
fn middle_rows_start_empty() {
    let board = new_starting_board();
    for row in 1..BOARD_HEIGHT - 1 {
        for column in 0..BOARD_WIDTH {
            assert!(board.piece_at(column, row).is_none());
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Empty and custom boards
// ---------------------------------------------------------------------------

#[test]
fn empty_board_keeps_dimensions() {
    let board = Board::empty();
    assert!(board.is_empty());
    assert_eq!(board.width(), 11);
    assert_eq!(board.height(), 7);
}

#[test]
fn default_board_is_starting_board() {
    assert_eq!(Board::default(), new_starting_board());
}

#[test]
fn from_pieces_preserves_order() {
    let pieces = vec![
        Piece::new(PieceKind::Dog, 9, 3),
        Piece::new(PieceKind::Buffalo, 0, 1),
        Piece::new(PieceKind::Chief, 2, 5),
    ];
    let board = Board::from_pieces(pieces.clone()).unwrap();
    assert_eq!(board.pieces(), pieces.as_slice());
}

// ---------------------------------------------------------------------------
// 3. Serde
// ---------------------------------------------------------------------------

#[test]
fn board_serializes_as_piece_list() {
    let board = Board::from_pieces(vec![Piece::new(PieceKind::Chief, 5, 6)]).unwrap();
    let json = serde_json::to_value(&board).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "kind": "Chief", "column": 5, "row": 6 }])
    );
}

#[test]
fn board_deserialization_validates_bounds() {
    let json = r#"[{ "kind": "Dog", "column": 3, "row": 9 }]"#;
    let result: Result<Board, _> = serde_json::from_str(json);
    let err = result.unwrap_err().to_string();
    assert!(
        err.contains("outside the 11x7 board"),
        "unexpected error message: {err}"
    );
}

#[test]
fn starting_board_survives_json() {
    let board = new_starting_board();
    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}
