//! Buffalo renderer -- draws the board and drives the frame loop.
//!
//! A frame is built as a flat list of [`DrawCommand`](render::DrawCommand)s
//! (checkerboard squares, grid lines, piece discs and letter labels) and
//! handed to a [`Surface`](render::Surface). The [`FrameLoop`] repeats that
//! either a fixed number of times (headless) or until the
//! [`DisplayContext`]'s input source reports a quit request.
//!
//! # Quick Start
//!
//! ```
//! use buffalo_render::prelude::*;
//!
//! let board = new_starting_board();
//! let config = RenderConfig { frame_limit: Some(3), ..Default::default() };
//! let mut display = DisplayContext::headless(config.surface_size(&board));
//!
//! let mut frame_loop = FrameLoop::new(board, config);
//! let report = frame_loop.run(&mut display).unwrap();
//! assert_eq!(report.frames, 3);
//! display.close();
//! ```

#![deny(unsafe_code)]

pub mod display;
pub mod frame;
pub mod render;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the board crate for convenience.
pub use buffalo_board;

pub use display::{DisplayContext, DisplayDriver, DisplayError, InputPoll, InputSource};
pub use frame::{render, FrameLoop, LoopReport, LoopState, QuitReason, RenderConfig};

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common renderer usage.
pub mod prelude {
    pub use buffalo_board::prelude::*;

    pub use crate::display::{
        DisplayContext, DisplayDriver, DisplayError, DummyInput, InputPoll, InputSource,
    };
    pub use crate::frame::{render, FrameLoop, LoopReport, LoopState, QuitReason, RenderConfig};
    pub use crate::render::{
        board_scene, DrawCommand, Layer, PixelSurface, RenderError, Shape, Surface, SurfaceSize,
    };
}
