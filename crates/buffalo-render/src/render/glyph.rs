//! 5x7 bitmap glyphs for piece labels.
//!
//! Each lit glyph pixel becomes one [`DrawCommand`] rectangle, so labels go
//! through the same pipeline as every other shape and need no font atlas.
//! Only the piece letters are defined.

use super::scene::{Color, DrawCommand, Layer, Shape};

/// Glyph width in glyph pixels.
pub const GLYPH_WIDTH: u32 = 5;

/// Glyph height in glyph pixels.
pub const GLYPH_HEIGHT: u32 = 7;

/// Row bitmaps, top to bottom. Bit 4 is the leftmost column.
fn glyph_rows(letter: char) -> Option<[u8; 7]> {
    let rows = match letter {
        'B' => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110,
        ],
        'C' => [
            0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110,
        ],
        'D' => [
            0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100,
        ],
        _ => return None,
    };
    Some(rows)
}

/// Whether the glyph pixel at `(col, row)` is lit. Unknown letters have no
/// lit pixels.
pub fn is_lit(letter: char, col: u32, row: u32) -> bool {
    if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
        return false;
    }
    glyph_rows(letter).is_some_and(|rows| (rows[row as usize] >> (GLYPH_WIDTH - 1 - col)) & 1 == 1)
}

/// Draw one letter with its top-left corner at `(x, y)`.
///
/// `scale` is the size of a glyph pixel in surface pixels. Letters without a
/// glyph produce no commands.
pub fn letter_commands(letter: char, x: f32, y: f32, scale: f32, color: Color) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            if !is_lit(letter, col, row) {
                continue;
            }
            commands.push(DrawCommand {
                layer: Layer::Label,
                shape: Shape::Rect {
                    x: x + col as f32 * scale,
                    y: y + row as f32 * scale,
                    width: scale,
                    height: scale,
                },
                color,
            });
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_letters_have_glyphs() {
        for letter in ['B', 'C', 'D'] {
            assert!(glyph_rows(letter).is_some(), "missing glyph for '{letter}'");
        }
    }

    #[test]
    fn unknown_letter_draws_nothing() {
        assert!(letter_commands('Z', 0.0, 0.0, 1.0, [255; 4]).is_empty());
    }

    #[test]
    fn lit_pixel_count_matches_bitmap() {
        // B: 4 + 2 + 2 + 4 + 2 + 2 + 4
        assert_eq!(letter_commands('B', 0.0, 0.0, 1.0, [255; 4]).len(), 20);
    }

    #[test]
    fn commands_are_scaled_and_offset() {
        let commands = letter_commands('C', 10.0, 20.0, 3.0, [0, 0, 0, 255]);
        // Top row of 'C' is 01110: first lit pixel is column 1.
        assert_eq!(
            commands[0].shape,
            Shape::Rect {
                x: 13.0,
                y: 20.0,
                width: 3.0,
                height: 3.0
            }
        );
        assert!(commands.iter().all(|c| c.layer == Layer::Label));
    }

    #[test]
    fn out_of_range_pixels_are_dark() {
        assert!(!is_lit('B', 5, 0));
        assert!(!is_lit('B', 0, 7));
    }
}
