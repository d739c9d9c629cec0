//! Display contexts: the surface and input source a frame loop runs against.
//!
//! A [`DisplayContext`] is opened explicitly and closed explicitly. Nothing
//! about the display lives in global state, which is what lets tests build a
//! context from a [`PixelSurface`] and a scripted [`InputSource`].
//!
//! # Drivers
//!
//! | Context | Surface | Input |
//! |---------|---------|-------|
//! | [`DisplayContext::headless`] | [`PixelSurface`] | none |
//! | [`DisplayDriver::Dummy`] | [`PixelSurface`] | [`DummyInput`] |
//! | [`DisplayDriver::Window`] | `GpuSurface` | winit window events |
//!
//! The interactive driver is picked from the `BUFFALO_DISPLAY_DRIVER`
//! environment variable; see [`DisplayDriver::from_env`]. The dummy driver's
//! input never quits unless `BUFFALO_DUMMY_QUIT_AFTER` sets a poll budget;
//! see [`DummyInput::from_env`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::render::{PixelSurface, Surface, SurfaceSize};

#[cfg(feature = "window")]
mod window;

#[cfg(feature = "window")]
pub use window::WindowInput;

/// Environment variable selecting the interactive display driver.
pub const DISPLAY_DRIVER_ENV: &str = "BUFFALO_DISPLAY_DRIVER";

/// Environment variable giving the dummy driver's quit budget in frames.
pub const DUMMY_QUIT_AFTER_ENV: &str = "BUFFALO_DUMMY_QUIT_AFTER";

/// Pause between polls of [`DummyInput`], roughly one 60 Hz frame.
pub const DUMMY_POLL_INTERVAL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while opening a display. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The driver name is not one we know.
    #[error("unknown display driver '{value}' (expected 'window' or 'dummy')")]
    UnknownDriver { value: String },

    /// The driver exists but was not compiled in.
    #[error("display driver '{driver}' is not available: {reason}")]
    DriverUnavailable {
        driver: DisplayDriver,
        reason: &'static str,
    },

    /// The dummy quit budget is not a non-negative integer.
    #[error("invalid BUFFALO_DUMMY_QUIT_AFTER value '{value}' (expected a frame count)")]
    InvalidQuitBudget { value: String },

    /// The windowing event loop could not be created.
    #[error("failed to create event loop: {0}")]
    EventLoop(String),

    /// The OS window could not be created.
    #[error("failed to create window: {0}")]
    Window(String),

    /// The GPU surface, adapter or device could not be set up.
    #[error("failed to initialize GPU renderer: {0}")]
    Renderer(String),
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Result of one input poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPoll {
    /// Nothing that concerns the loop happened.
    None,
    /// The user asked to quit (window closed, Escape pressed).
    QuitRequested,
}

/// A synchronous source of quit requests, polled once per loop iteration.
pub trait InputSource {
    fn poll(&mut self) -> InputPoll;
}

/// Input for the `dummy` driver.
///
/// Without a quit budget it never requests quit. With
/// [`with_quit_after(n)`](Self::with_quit_after) the first `n` polls report
/// nothing and every later poll reports [`InputPoll::QuitRequested`], so an
/// interactive loop renders exactly `n` frames.
///
/// Each quiet poll sleeps for the configured interval so an unbounded dummy
/// loop does not spin a core.
#[derive(Debug, Clone)]
pub struct DummyInput {
    interval: Duration,
    polls: u64,
    quit_after: Option<u64>,
}

impl DummyInput {
    pub fn new() -> Self {
        Self::with_interval(DUMMY_POLL_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            polls: 0,
            quit_after: None,
        }
    }

    /// Request quit once `polls` polls have been answered.
    pub fn with_quit_after(mut self, polls: u64) -> Self {
        self.quit_after = Some(polls);
        self
    }

    /// Default-paced input with the budget from [`DUMMY_QUIT_AFTER_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::InvalidQuitBudget`] if the variable is set to
    /// something other than a non-negative integer.
    pub fn from_env() -> Result<Self, DisplayError> {
        Self::from_env_value(std::env::var(DUMMY_QUIT_AFTER_ENV).ok().as_deref())
    }

    /// Resolve the quit budget from the raw variable value. Unset or blank
    /// means no budget.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, DisplayError> {
        let input = Self::new();
        match value.map(str::trim) {
            None | Some("") => Ok(input),
            Some(raw) => raw
                .parse::<u64>()
                .map(|n| input.with_quit_after(n))
                .map_err(|_| DisplayError::InvalidQuitBudget {
                    value: raw.to_owned(),
                }),
        }
    }

    /// Number of polls answered so far, including the one that quit.
    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn quit_after(&self) -> Option<u64> {
        self.quit_after
    }
}

impl Default for DummyInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for DummyInput {
    fn poll(&mut self) -> InputPoll {
        self.polls += 1;
        if self.quit_after.is_some_and(|budget| self.polls > budget) {
            tracing::debug!(polls = self.polls, "dummy quit budget spent");
            return InputPoll::QuitRequested;
        }
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
        InputPoll::None
    }
}

// ---------------------------------------------------------------------------
// DisplayDriver
// ---------------------------------------------------------------------------

/// Interactive display back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayDriver {
    /// A real OS window rendered with wgpu.
    #[default]
    Window,
    /// Off-screen pixel buffer with an input source that never quits.
    Dummy,
}

impl DisplayDriver {
    /// Read the driver from [`DISPLAY_DRIVER_ENV`].
    ///
    /// An unset or blank variable selects [`DisplayDriver::Window`].
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::UnknownDriver`] for any other unrecognized
    /// value.
    pub fn from_env() -> Result<Self, DisplayError> {
        Self::from_env_value(std::env::var(DISPLAY_DRIVER_ENV).ok().as_deref())
    }

    /// Resolve the driver from the raw variable value.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, DisplayError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(name) => name.parse(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayDriver::Window => "window",
            DisplayDriver::Dummy => "dummy",
        }
    }
}

impl FromStr for DisplayDriver {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "window" => Ok(DisplayDriver::Window),
            "dummy" => Ok(DisplayDriver::Dummy),
            _ => Err(DisplayError::UnknownDriver {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DisplayDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// DisplayContext
// ---------------------------------------------------------------------------

/// An open display: one surface plus, for interactive use, one input source.
///
/// The context owns both and lends them to the frame loop through
/// [`parts_mut`](Self::parts_mut). Call [`close`](Self::close) when done;
/// dropping the context releases the same resources without the log line.
pub struct DisplayContext {
    // Field order is drop order: the surface goes before the window's event
    // loop.
    surface: Box<dyn Surface>,
    input: Option<Box<dyn InputSource>>,
    driver: Option<DisplayDriver>,
}

impl DisplayContext {
    /// An off-screen context with no input source, for frame-limited runs.
    pub fn headless(size: SurfaceSize) -> Self {
        tracing::info!(
            width = size.width,
            height = size.height,
            "headless display opened"
        );
        Self {
            surface: Box::new(PixelSurface::new(size)),
            input: None,
            driver: None,
        }
    }

    /// Open an interactive display.
    ///
    /// # Errors
    ///
    /// Returns a [`DisplayError`] if the driver is not compiled in, the dummy
    /// quit budget is malformed, or the window, event loop or GPU surface
    /// cannot be created.
    pub fn open(driver: DisplayDriver, title: &str, size: SurfaceSize) -> Result<Self, DisplayError> {
        let (surface, input): (Box<dyn Surface>, Box<dyn InputSource>) = match driver {
            DisplayDriver::Dummy => (
                Box::new(PixelSurface::new(size)),
                Box::new(DummyInput::from_env()?),
            ),
            DisplayDriver::Window => Self::open_window(title, size)?,
        };

        tracing::info!(
            driver = %driver,
            width = size.width,
            height = size.height,
            "display opened"
        );

        Ok(Self {
            surface,
            input: Some(input),
            driver: Some(driver),
        })
    }

    #[cfg(feature = "window")]
    fn open_window(
        title: &str,
        size: SurfaceSize,
    ) -> Result<(Box<dyn Surface>, Box<dyn InputSource>), DisplayError> {
        let (surface, input) = window::open(title, size)?;
        Ok((Box::new(surface), Box::new(input)))
    }

    #[cfg(not(feature = "window"))]
    fn open_window(
        _title: &str,
        _size: SurfaceSize,
    ) -> Result<(Box<dyn Surface>, Box<dyn InputSource>), DisplayError> {
        Err(DisplayError::DriverUnavailable {
            driver: DisplayDriver::Window,
            reason: "built without the `window` feature",
        })
    }

    /// Build a context from caller-supplied parts.
    pub fn from_parts(surface: Box<dyn Surface>, input: Option<Box<dyn InputSource>>) -> Self {
        Self {
            surface,
            input,
            driver: None,
        }
    }

    /// The interactive driver this context was opened with, if any.
    pub fn driver(&self) -> Option<DisplayDriver> {
        self.driver
    }

    /// Pixel size of the surface.
    pub fn size(&self) -> SurfaceSize {
        self.surface.size()
    }

    /// Whether an input source is attached.
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Borrow the surface and input source at the same time.
    pub fn parts_mut(
        &mut self,
    ) -> (
        &mut (dyn Surface + 'static),
        Option<&mut (dyn InputSource + 'static)>,
    ) {
        (self.surface.as_mut(), self.input.as_deref_mut())
    }

    /// Tear the display down.
    pub fn close(self) {
        tracing::info!(
            driver = self.driver.map_or("headless", DisplayDriver::name),
            "display closed"
        );
    }
}

impl fmt::Debug for DisplayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayContext")
            .field("driver", &self.driver)
            .field("size", &self.surface.size())
            .field("has_input", &self.input.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_driver_defaults_to_window() {
        assert_eq!(
            DisplayDriver::from_env_value(None).unwrap(),
            DisplayDriver::Window
        );
        assert_eq!(
            DisplayDriver::from_env_value(Some("  ")).unwrap(),
            DisplayDriver::Window
        );
    }

    #[test]
    fn driver_names_parse_case_insensitively() {
        assert_eq!(
            DisplayDriver::from_env_value(Some("DUMMY")).unwrap(),
            DisplayDriver::Dummy
        );
        assert_eq!("window".parse::<DisplayDriver>().unwrap(), DisplayDriver::Window);
    }

    #[test]
    fn unknown_driver_is_an_error() {
        let err = DisplayDriver::from_env_value(Some("x11")).unwrap_err();
        assert!(matches!(err, DisplayError::UnknownDriver { ref value } if value == "x11"));
    }

    #[test]
    fn dummy_input_never_quits() {
        let mut input = DummyInput::with_interval(Duration::ZERO);
        for _ in 0..100 {
            assert_eq!(input.poll(), InputPoll::None);
        }
        assert_eq!(input.polls(), 100);
    }

    #[test]
    fn dummy_input_quits_after_budget() {
        let mut input = DummyInput::with_interval(Duration::ZERO).with_quit_after(3);
        let polls: Vec<_> = (0..5).map(|_| input.poll()).collect();
        assert_eq!(
            polls,
            [
                InputPoll::None,
                InputPoll::None,
                InputPoll::None,
                InputPoll::QuitRequested,
                InputPoll::QuitRequested,
            ]
        );
    }

    #[test]
    fn zero_budget_quits_on_first_poll() {
        let mut input = DummyInput::with_interval(Duration::ZERO).with_quit_after(0);
        assert_eq!(input.poll(), InputPoll::QuitRequested);
    }

    #[test]
    fn quit_budget_from_env_value() {
        assert_eq!(DummyInput::from_env_value(None).unwrap().quit_after(), None);
        assert_eq!(DummyInput::from_env_value(Some(" ")).unwrap().quit_after(), None);
        assert_eq!(
            DummyInput::from_env_value(Some("12")).unwrap().quit_after(),
            Some(12)
        );
        let err = DummyInput::from_env_value(Some("-1")).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidQuitBudget { ref value } if value == "-1"));
    }

    #[test]
    fn dummy_display_has_input_and_size() {
        let display =
            DisplayContext::open(DisplayDriver::Dummy, "test", SurfaceSize::new(88, 56)).unwrap();
        assert!(display.has_input());
        assert_eq!(display.driver(), Some(DisplayDriver::Dummy));
        assert_eq!(display.size(), SurfaceSize::new(88, 56));
        display.close();
    }

    #[test]
    fn headless_display_has_no_input() {
        let display = DisplayContext::headless(SurfaceSize::new(11, 7));
        assert!(!display.has_input());
        assert_eq!(display.driver(), None);
    }

    #[cfg(not(feature = "window"))]
    #[test]
    fn window_driver_needs_the_feature() {
        let err = DisplayContext::open(DisplayDriver::Window, "test", SurfaceSize::new(8, 8))
            .unwrap_err();
        assert!(matches!(err, DisplayError::DriverUnavailable { .. }));
    }
}
