//! Drawable surfaces.
//!
//! A [`Surface`] has fixed pixel dimensions and presents one frame per
//! [`present`](Surface::present) call. [`PixelSurface`] is the CPU
//! implementation used for headless runs, the `dummy` display driver and
//! tests. Its rasterizer samples pixel centers and clips everything to the
//! surface, so no draw command can make it fail.

use super::scene::{Color, DrawCommand, Shape, BACKGROUND};

/// Pixel dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Errors a surface can report while presenting a frame.
///
/// Recoverable conditions (lost or outdated swapchain, timeouts) are handled
/// inside the surface. Only faults that should end the loop surface here.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The GPU ran out of memory.
    #[error("GPU out of memory while presenting a frame")]
    OutOfMemory,

    /// Any other unrecoverable surface failure.
    #[error("surface failure: {0}")]
    Surface(String),
}

/// Something a frame can be drawn on.
pub trait Surface {
    /// Pixel dimensions of the surface.
    fn size(&self) -> SurfaceSize;

    /// Clear the surface, draw `commands` in order and present the result.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] only for faults the surface cannot recover
    /// from.
    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), RenderError>;
}

// ---------------------------------------------------------------------------
// PixelSurface
// ---------------------------------------------------------------------------

/// An off-screen RGBA8 framebuffer.
///
/// Pixels are stored row-major from the top-left corner. Drawing replaces
/// pixels outright (no blending), matching the opaque palette of the scene.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    size: SurfaceSize,
    pixels: Vec<Color>,
    frames_presented: u64,
}

impl PixelSurface {
    /// A surface of `size`, cleared to the background color.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            pixels: vec![BACKGROUND; size.area()],
            frames_presented: 0,
        }
    }

    /// The color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Fill the whole surface with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Rasterize a single command.
    pub fn draw(&mut self, command: &DrawCommand) {
        match command.shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => {
                let (x0, x1) = span(x, x + width, self.size.width);
                let (y0, y1) = span(y, y + height, self.size.height);
                for py in y0..y1 {
                    let row = py * self.size.width as usize;
                    self.pixels[row + x0..row + x1].fill(command.color);
                }
            }
            Shape::Circle { cx, cy, radius } => {
                let (x0, x1) = span(cx - radius, cx + radius, self.size.width);
                let (y0, y1) = span(cy - radius, cy + radius, self.size.height);
                let r2 = radius * radius;
                for py in y0..y1 {
                    let dy = py as f32 + 0.5 - cy;
                    let row = py * self.size.width as usize;
                    for px in x0..x1 {
                        let dx = px as f32 + 0.5 - cx;
                        if dx * dx + dy * dy <= r2 {
                            self.pixels[row + px] = command.color;
                        }
                    }
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), RenderError> {
        self.clear(BACKGROUND);
        for command in commands {
            self.draw(command);
        }
        self.frames_presented += 1;
        Ok(())
    }
}

/// Pixel indices whose centers fall in `[start, end)`, clipped to `[0, limit)`.
fn span(start: f32, end: f32, limit: u32) -> (usize, usize) {
    let clip = |v: f32| ((v - 0.5).ceil().max(0.0) as i64).min(i64::from(limit)) as usize;
    let lo = clip(start);
    let hi = clip(end);
    (lo, hi.max(lo))
}
