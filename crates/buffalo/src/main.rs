//! `buffalo` -- draws the Buffalo starting position.
//!
//! ```bash
//! cargo run -p buffalo                 # interactive window
//! cargo run -p buffalo -- --frames 3   # headless, three frames
//! BUFFALO_DISPLAY_DRIVER=dummy cargo run -p buffalo
//! ```
//!
//! Exit status: 0 on success, 1 when the display or a frame fails, 2 on a
//! usage error.

mod cli;

use anyhow::Context;

use buffalo_board::new_starting_board;
use buffalo_render::{DisplayContext, DisplayDriver, FrameLoop, RenderConfig};

use cli::{CliOptions, Command, USAGE};

/// Window title for interactive runs.
const WINDOW_TITLE: &str = "Buffalo!";

fn main() -> anyhow::Result<()> {
    let command = match cli::parse_args(std::env::args_os().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let options = match command {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Run(options) => options,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(options)
}

fn run(options: CliOptions) -> anyhow::Result<()> {
    let board = new_starting_board();
    let config = RenderConfig {
        frame_limit: options.frames.map(|n| n.get()),
        ..Default::default()
    };
    let size = config.surface_size(&board);

    let mut display = if config.is_headless() {
        DisplayContext::headless(size)
    } else {
        let driver = DisplayDriver::from_env().context("failed to select display driver")?;
        DisplayContext::open(driver, WINDOW_TITLE, size)
            .with_context(|| format!("failed to open '{driver}' display"))?
    };

    let mut frame_loop = FrameLoop::new(board, config);
    let report = frame_loop.run(&mut display).context("render loop failed")?;
    tracing::info!(frames = report.frames, reason = ?report.reason, "done");

    display.close();
    Ok(())
}
