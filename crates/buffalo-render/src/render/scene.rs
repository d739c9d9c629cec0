//! Board scene composition.
//!
//! [`board_scene`] is a pure function from a board to the draw commands of
//! one frame. It needs no display, which is what lets the headless tests
//! count grid lines and pieces directly.
//!
//! # Layers (back to front)
//!
//! | Layer | Content | Color |
//! |-------|---------|-------|
//! | Square | checkerboard fill | light #F0D9B5 / dark #B58863 |
//! | GridLine | 12 vertical + 8 horizontal lines | black |
//! | Piece | disc of radius `square_size / 3` | buffalo brown, dog gray, chief gold |
//! | Label | piece letter, 5x7 glyph | white on buffalo, black otherwise |
//!
//! The horizontal lines bounding the two end zones (below row 0 and above
//! the last row) are drawn twice as thick as the rest.

use buffalo_board::prelude::*;

use super::glyph::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

/// RGBA color, 8 bits per channel, sRGB.
pub type Color = [u8; 4];

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Clear color behind the board.
pub const BACKGROUND: Color = [13, 13, 26, 255];

/// Light checkerboard square.
pub const LIGHT_SQUARE: Color = [240, 217, 181, 255];

/// Dark checkerboard square.
pub const DARK_SQUARE: Color = [181, 136, 99, 255];

/// Grid lines.
pub const LINE_COLOR: Color = [0, 0, 0, 255];

/// Width of an ordinary grid line in pixels.
pub const GRID_LINE_WIDTH: u32 = 2;

/// Width of the two end-zone lines in pixels.
pub const END_ZONE_LINE_WIDTH: u32 = 4;

/// Largest square size a scene accepts. Keeps every pixel coordinate of a
/// board well inside `u32`.
pub const MAX_SQUARE_SIZE: u32 = 4096;

/// Label glyph pixels are `square_size / LABEL_SCALE_DIVISOR` pixels wide
/// (at least one).
const LABEL_SCALE_DIVISOR: u32 = 20;

/// Disc color for a piece kind.
pub fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::Buffalo => [139, 69, 19, 255],
        PieceKind::Dog => [105, 105, 105, 255],
        PieceKind::Chief => [255, 215, 0, 255],
    }
}

/// Label color for a piece kind.
pub fn label_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::Buffalo => [255, 255, 255, 255],
        PieceKind::Dog | PieceKind::Chief => [0, 0, 0, 255],
    }
}

// ---------------------------------------------------------------------------
// DrawCommand
// ---------------------------------------------------------------------------

/// Which part of the scene a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Square,
    GridLine,
    Piece,
    Label,
}

/// A filled primitive in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle given by its top-left corner and extents.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Disc given by its center and radius.
    Circle { cx: f32, cy: f32, radius: f32 },
}

/// One filled shape of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub layer: Layer,
    pub shape: Shape,
    pub color: Color,
}

impl DrawCommand {
    fn rect(layer: Layer, x: u32, y: u32, width: u32, height: u32, color: Color) -> Self {
        Self {
            layer,
            shape: Shape::Rect {
                x: x as f32,
                y: y as f32,
                width: width as f32,
                height: height as f32,
            },
            color,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Build the draw commands for one frame of `board`.
///
/// Commands are ordered back to front: every square, then every grid line,
/// then a disc and a label per piece in board order. The scene always spans
/// `width * square_size` by `height * square_size` pixels, whatever the
/// pieces.
///
/// Pieces outside the grid are not rejected here; their shapes simply land
/// outside the surface and get clipped.
///
/// # Panics
///
/// Panics if `square_size` is above [`MAX_SQUARE_SIZE`].
pub fn board_scene(board: &Board, square_size: u32) -> Vec<DrawCommand> {
    assert!(
        square_size <= MAX_SQUARE_SIZE,
        "square_size must be at most {MAX_SQUARE_SIZE}, got {square_size}"
    );
    let columns = u32::from(board.width());
    let rows = u32::from(board.height());

    let mut commands = Vec::with_capacity(
        (columns * rows) as usize + (columns + rows + 2) as usize + board.pieces().len() * 24,
    );

    push_squares(&mut commands, columns, rows, square_size);
    push_grid_lines(&mut commands, columns, rows, square_size);
    for piece in board.pieces() {
        push_piece(&mut commands, piece, square_size);
    }

    tracing::trace!(commands = commands.len(), pieces = board.pieces().len(), "board scene built");
    commands
}

/// Number of commands on `layer`.
pub fn count_layer(commands: &[DrawCommand], layer: Layer) -> usize {
    commands.iter().filter(|c| c.layer == layer).count()
}

fn push_squares(out: &mut Vec<DrawCommand>, columns: u32, rows: u32, size: u32) {
    for row in 0..rows {
        for column in 0..columns {
            let color = if (column + row) % 2 == 0 {
                LIGHT_SQUARE
            } else {
                DARK_SQUARE
            };
            out.push(DrawCommand::rect(
                Layer::Square,
                column * size,
                row * size,
                size,
                size,
                color,
            ));
        }
    }
}

fn push_grid_lines(out: &mut Vec<DrawCommand>, columns: u32, rows: u32, size: u32) {
    let pixel_width = columns * size;
    let pixel_height = rows * size;

    for column in 0..=columns {
        let x = line_offset(column * size, GRID_LINE_WIDTH, pixel_width);
        out.push(DrawCommand::rect(
            Layer::GridLine,
            x,
            0,
            GRID_LINE_WIDTH,
            pixel_height,
            LINE_COLOR,
        ));
    }

    for row in 0..=rows {
        let thickness = if row == 1 || row + 1 == rows {
            END_ZONE_LINE_WIDTH
        } else {
            GRID_LINE_WIDTH
        };
        let y = line_offset(row * size, thickness, pixel_height);
        out.push(DrawCommand::rect(
            Layer::GridLine,
            0,
            y,
            pixel_width,
            thickness,
            LINE_COLOR,
        ));
    }
}

/// Center a line of `thickness` on `at`, keeping it inside `[0, extent)` so
/// the outer border lines stay visible.
fn line_offset(at: u32, thickness: u32, extent: u32) -> u32 {
    at.saturating_sub(thickness / 2)
        .min(extent.saturating_sub(thickness))
}

fn push_piece(out: &mut Vec<DrawCommand>, piece: &Piece, size: u32) {
    let left = u32::from(piece.column) * size;
    let top = u32::from(piece.row) * size;
    let cx = left as f32 + size as f32 / 2.0;
    let cy = top as f32 + size as f32 / 2.0;

    out.push(DrawCommand {
        layer: Layer::Piece,
        shape: Shape::Circle {
            cx,
            cy,
            radius: size as f32 / 3.0,
        },
        color: piece_color(piece.kind),
    });

    let scale = (size / LABEL_SCALE_DIVISOR).max(1);
    let label_x = (left + size / 2).saturating_sub(GLYPH_WIDTH * scale / 2);
    let label_y = (top + size / 2).saturating_sub(GLYPH_HEIGHT * scale / 2);
    out.extend(glyph::letter_commands(
        piece.kind.letter(),
        label_x as f32,
        label_y as f32,
        scale as f32,
        label_color(piece.kind),
    ));
}
