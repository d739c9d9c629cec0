//! The `window` display driver: a winit window presented through wgpu.
//!
//! Winit 0.30 delivers events to an [`ApplicationHandler`] and only creates
//! windows inside its `resumed` callback. Rather than hand the program over
//! to `run_app`, the event loop is pumped explicitly: once at startup until
//! the window exists, then once per [`InputSource::poll`] with a zero
//! timeout. The handler only records what happened.
//!
//! This module is feature-gated behind `window`.

use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use super::{DisplayError, InputPoll, InputSource};
use crate::render::{GpuSurface, SurfaceSize};

/// How many startup pumps to wait for `resumed` before giving up.
const WINDOW_CREATE_ATTEMPTS: u32 = 200;

/// Timeout of each startup pump.
const WINDOW_CREATE_PUMP: Duration = Duration::from_millis(10);

/// Open a window of `size` and bind a GPU surface to it.
pub(super) fn open(title: &str, size: SurfaceSize) -> Result<(GpuSurface, WindowInput), DisplayError> {
    let mut event_loop = EventLoop::new().map_err(|e| DisplayError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = WindowHandler {
        title: title.to_owned(),
        size,
        window: None,
        init_error: None,
        quit_requested: false,
    };

    for _ in 0..WINDOW_CREATE_ATTEMPTS {
        let status = event_loop.pump_app_events(Some(WINDOW_CREATE_PUMP), &mut handler);
        if let Some(err) = handler.init_error.take() {
            return Err(DisplayError::Window(err));
        }
        if handler.window.is_some() {
            break;
        }
        if let PumpStatus::Exit(code) = status {
            return Err(DisplayError::Window(format!(
                "event loop exited with code {code} before the window was created"
            )));
        }
    }

    let window = handler
        .window
        .clone()
        .ok_or_else(|| DisplayError::Window("platform never resumed the application".to_owned()))?;

    let surface = pollster::block_on(GpuSurface::new(window.clone(), size))?;
    window.request_redraw();

    Ok((
        surface,
        WindowInput {
            event_loop,
            handler,
        },
    ))
}

// ---------------------------------------------------------------------------
// WindowInput
// ---------------------------------------------------------------------------

/// Quit detection for the `window` driver.
///
/// Owns the event loop. Each poll drains pending OS events without blocking.
pub struct WindowInput {
    event_loop: EventLoop<()>,
    handler: WindowHandler,
}

impl InputSource for WindowInput {
    fn poll(&mut self) -> InputPoll {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        if self.handler.quit_requested || matches!(status, PumpStatus::Exit(_)) {
            InputPoll::QuitRequested
        } else {
            InputPoll::None
        }
    }
}

// ---------------------------------------------------------------------------
// WindowHandler
// ---------------------------------------------------------------------------

/// Records window creation and quit requests for the pump loop.
struct WindowHandler {
    title: String,
    size: SurfaceSize,
    window: Option<Arc<Window>>,
    init_error: Option<String>,
    quit_requested: bool,
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.size.width,
                self.size.height,
            ))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                tracing::debug!(
                    width = self.size.width,
                    height = self.size.height,
                    "window created"
                );
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create window");
                self.init_error = Some(e.to_string());
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested");
                self.quit_requested = true;
            }
            WindowEvent::KeyboardInput { event: key_ev, .. }
                if key_ev.state == ElementState::Pressed
                    && key_ev.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                tracing::info!("escape pressed");
                self.quit_requested = true;
            }
            WindowEvent::Resized(new_size) => {
                tracing::debug!(
                    width = new_size.width,
                    height = new_size.height,
                    "window resized"
                );
            }
            _ => {}
        }
    }
}
