//! The frame loop.
//!
//! A [`FrameLoop`] owns the board and renders it over and over. It has two
//! modes, chosen by [`RenderConfig::frame_limit`]:
//!
//! - **Headless** (`Some(n)`): render exactly `n` frames, never touch input.
//! - **Interactive** (`None`): poll the input source once per iteration;
//!   render unless it reports [`InputPoll::QuitRequested`].
//!
//! Every run starts in [`LoopState::Running`] and ends in
//! [`LoopState::Quitting`], whether it finished or failed.
//!
//! # Example
//!
//! ```
//! use buffalo_render::prelude::*;
//!
//! let board = new_starting_board();
//! let config = RenderConfig { square_size: 8, frame_limit: Some(2) };
//! let mut surface = PixelSurface::new(config.surface_size(&board));
//!
//! let mut frame_loop = FrameLoop::new(board, config);
//! let report = frame_loop.run_headless(&mut surface, 2).unwrap();
//!
//! assert_eq!(report.frames, 2);
//! assert_eq!(surface.frames_presented(), 2);
//! assert_eq!(frame_loop.state(), LoopState::Quitting);
//! ```

use buffalo_board::board::Board;

use crate::display::{DisplayContext, InputPoll, InputSource};
use crate::render::{board_scene, RenderError, Surface, SurfaceSize};

pub use crate::render::scene::MAX_SQUARE_SIZE;

/// Default edge length of a board square in pixels.
pub const DEFAULT_SQUARE_SIZE: u32 = 80;

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Edge length of one square in pixels, in `1..=MAX_SQUARE_SIZE`.
    pub square_size: u32,
    /// Headless mode: render exactly this many frames, then stop.
    pub frame_limit: Option<u32>,
}

impl Default for RenderConfig {
    /// 80 px squares, interactive.
    fn default() -> Self {
        Self {
            square_size: DEFAULT_SQUARE_SIZE,
            frame_limit: None,
        }
    }
}

impl RenderConfig {
    /// Whether a frame limit selects headless mode.
    pub fn is_headless(&self) -> bool {
        self.frame_limit.is_some()
    }

    /// Pixel size of a surface that fits `board` exactly. Saturates instead
    /// of overflowing for square sizes past [`MAX_SQUARE_SIZE`].
    pub fn surface_size(&self, board: &Board) -> SurfaceSize {
        SurfaceSize::new(
            u32::from(board.width()).saturating_mul(self.square_size),
            u32::from(board.height()).saturating_mul(self.square_size),
        )
    }
}

/// Draw one frame of `board` on `surface`.
///
/// # Errors
///
/// Only surfaces with unrecoverable faults (GPU out of memory) return an
/// error; [`PixelSurface`](crate::render::PixelSurface) never does.
pub fn render<S>(board: &Board, surface: &mut S, config: &RenderConfig) -> Result<(), RenderError>
where
    S: Surface + ?Sized,
{
    let commands = board_scene(board, config.square_size);
    surface.present(&commands)
}

// ---------------------------------------------------------------------------
// Loop state
// ---------------------------------------------------------------------------

/// Lifecycle of a [`FrameLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal.
    Quitting,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitReason {
    /// Headless mode rendered its frame budget.
    FrameLimitReached,
    /// The input source reported a quit request.
    QuitRequested,
    /// Interactive mode was asked to run without an input source.
    InputClosed,
}

/// Summary of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Frames rendered during this run.
    pub frames: u64,
    pub reason: QuitReason,
}

// ---------------------------------------------------------------------------
// FrameLoop
// ---------------------------------------------------------------------------

/// Drives rendering of a fixed board.
#[derive(Debug)]
pub struct FrameLoop {
    board: Board,
    config: RenderConfig,
    frame_counter: u64,
    state: LoopState,
}

impl FrameLoop {
    /// Create a loop in the [`Running`](LoopState::Running) state.
    ///
    /// # Panics
    ///
    /// Panics if `config.square_size` is zero or above [`MAX_SQUARE_SIZE`].
    pub fn new(board: Board, config: RenderConfig) -> Self {
        assert!(
            config.square_size > 0,
            "square_size must be positive, got {}",
            config.square_size
        );
        assert!(
            config.square_size <= MAX_SQUARE_SIZE,
            "square_size must be at most {MAX_SQUARE_SIZE}, got {}",
            config.square_size
        );
        Self {
            board,
            config,
            frame_counter: 0,
            state: LoopState::Running,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Frames rendered over the loop's lifetime.
    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_headless(&self) -> bool {
        self.config.is_headless()
    }

    /// Render a single frame and count it.
    ///
    /// # Errors
    ///
    /// Propagates the surface's [`RenderError`]; the loop then quits.
    pub fn render_frame<S>(&mut self, surface: &mut S) -> Result<(), RenderError>
    where
        S: Surface + ?Sized,
    {
        if let Err(e) = render(&self.board, surface, &self.config) {
            tracing::error!(error = %e, frame = self.frame_counter, "frame failed -- quitting");
            self.state = LoopState::Quitting;
            return Err(e);
        }
        self.frame_counter += 1;
        tracing::trace!(frame = self.frame_counter, "frame presented");
        Ok(())
    }

    /// Run on `display` in the mode selected by the config.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RenderError`].
    pub fn run(&mut self, display: &mut DisplayContext) -> Result<LoopReport, RenderError> {
        let (surface, input) = display.parts_mut();
        match (self.config.frame_limit, input) {
            (Some(limit), _) => self.run_headless(surface, limit),
            (None, Some(input)) => self.run_interactive(surface, input),
            (None, None) => {
                tracing::warn!("interactive run requested on a display without input -- quitting");
                self.state = LoopState::Quitting;
                Ok(LoopReport {
                    frames: 0,
                    reason: QuitReason::InputClosed,
                })
            }
        }
    }

    /// Render exactly `limit` frames without polling input.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RenderError`].
    pub fn run_headless<S>(
        &mut self,
        surface: &mut S,
        limit: u32,
    ) -> Result<LoopReport, RenderError>
    where
        S: Surface + ?Sized,
    {
        tracing::info!(frames = limit, "headless run started");
        self.state = LoopState::Running;

        for _ in 0..limit {
            self.render_frame(surface)?;
        }

        self.state = LoopState::Quitting;
        tracing::info!(frames = limit, "frame limit reached");
        Ok(LoopReport {
            frames: u64::from(limit),
            reason: QuitReason::FrameLimitReached,
        })
    }

    /// Poll, render, repeat until `input` reports a quit request.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RenderError`].
    pub fn run_interactive<S, I>(
        &mut self,
        surface: &mut S,
        input: &mut I,
    ) -> Result<LoopReport, RenderError>
    where
        S: Surface + ?Sized,
        I: InputSource + ?Sized,
    {
        tracing::info!("interactive run started");
        self.state = LoopState::Running;
        let start = self.frame_counter;

        while self.state == LoopState::Running {
            match input.poll() {
                InputPoll::QuitRequested => self.state = LoopState::Quitting,
                InputPoll::None => self.render_frame(surface)?,
            }
        }

        let frames = self.frame_counter - start;
        tracing::info!(frames, "quit requested");
        Ok(LoopReport {
            frames,
            reason: QuitReason::QuitRequested,
        })
    }
}
