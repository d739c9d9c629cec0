//! Frame composition and the surfaces frames are drawn on.
//!
//! [`board_scene`] turns a board into draw commands in pixel space (origin at
//! the top-left corner, y growing downwards). A [`Surface`] consumes them:
//! [`PixelSurface`] rasterizes on the CPU and works everywhere, while
//! `GpuSurface` (feature `window`) uploads them to a wgpu pipeline bound to
//! an OS window.

pub mod glyph;
pub mod scene;
pub mod surface;

#[cfg(feature = "window")]
pub mod gpu;

pub use scene::{board_scene, Color, DrawCommand, Layer, Shape};
pub use surface::{PixelSurface, RenderError, Surface, SurfaceSize};

#[cfg(feature = "window")]
pub use gpu::{GpuSurface, PixelProjection};
