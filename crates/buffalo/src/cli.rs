//! Command-line parsing.
//!
//! Usage:
//!   buffalo [OPTIONS]
//!
//! Options:
//!   --frames N   Render N frames headlessly, then exit (N >= 1)
//!   -h, --help   Print this help

use std::ffi::OsString;
use std::num::NonZeroU32;

/// Usage text printed for `--help` and after a usage error.
pub const USAGE: &str = "\
Usage: buffalo [OPTIONS]

Draws the Buffalo board. Without options, opens a window that stays up
until it is closed or Escape is pressed.

Options:
  --frames N   Render N frames headlessly, then exit (N >= 1)
  -h, --help   Print this help

Environment:
  BUFFALO_DISPLAY_DRIVER   'window' (default) or 'dummy'
  BUFFALO_DUMMY_QUIT_AFTER quit a 'dummy' run after this many frames
  RUST_LOG                 log filter (default: info)";

/// Options for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CliOptions {
    /// Headless frame budget; `None` runs interactively.
    pub frames: Option<NonZeroU32>,
}

/// What the process was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run(CliOptions),
    Help,
}

/// Bad command-line input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("missing value for {flag}")]
    MissingValue { flag: &'static str },

    #[error("invalid value '{value}' for --frames: expected an integer >= 1")]
    InvalidFrames { value: String },

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    /// An argument that is not valid UTF-8, shown lossily.
    #[error("argument '{lossy}' is not valid UTF-8")]
    InvalidArgument { lossy: String },
}

/// Parse arguments, excluding the program name.
///
/// `--help` wins as soon as it is seen; arguments after it are ignored.
/// Arguments are taken as raw OS strings so that non-UTF-8 input is a usage
/// error rather than a panic.
pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let arg = utf8(arg)?;
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--frames" => {
                let value = args
                    .next()
                    .ok_or(UsageError::MissingValue { flag: "--frames" })?;
                options.frames = Some(parse_frames(&utf8(value)?)?);
            }
            other => match other.strip_prefix("--frames=") {
                Some(value) => options.frames = Some(parse_frames(value)?),
                None => return Err(UsageError::UnknownArgument(other.to_owned())),
            },
        }
    }

    Ok(Command::Run(options))
}

fn utf8(arg: OsString) -> Result<String, UsageError> {
    arg.into_string().map_err(|raw| UsageError::InvalidArgument {
        lossy: raw.to_string_lossy().into_owned(),
    })
}

fn parse_frames(value: &str) -> Result<NonZeroU32, UsageError> {
    value
        .parse::<NonZeroU32>()
        .map_err(|_| UsageError::InvalidFrames {
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, UsageError> {
        parse_args(args.iter().map(OsString::from))
    }

    fn frames(n: u32) -> Command {
        Command::Run(CliOptions {
            frames: NonZeroU32::new(n),
        })
    }

    #[test]
    fn no_arguments_runs_interactively() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(CliOptions::default()));
    }

    #[test]
    fn frames_as_separate_value() {
        assert_eq!(parse(&["--frames", "5"]).unwrap(), frames(5));
    }

    #[test]
    fn frames_with_equals() {
        assert_eq!(parse(&["--frames=12"]).unwrap(), frames(12));
    }

    #[test]
    fn last_frames_flag_wins() {
        assert_eq!(parse(&["--frames", "1", "--frames=3"]).unwrap(), frames(3));
    }

    #[test]
    fn zero_frames_is_rejected() {
        let err = parse(&["--frames", "0"]).unwrap_err();
        assert_eq!(
            err,
            UsageError::InvalidFrames {
                value: "0".to_owned()
            }
        );
    }

    #[test]
    fn non_integer_frames_are_rejected() {
        for bad in ["abc", "-3", "1.5", ""] {
            assert!(
                matches!(parse(&["--frames", bad]), Err(UsageError::InvalidFrames { .. })),
                "'{bad}' should be rejected"
            );
        }
        assert!(matches!(
            parse(&["--frames="]),
            Err(UsageError::InvalidFrames { .. })
        ));
    }

    #[test]
    fn missing_frames_value() {
        assert_eq!(
            parse(&["--frames"]).unwrap_err(),
            UsageError::MissingValue { flag: "--frames" }
        );
    }

    #[test]
    fn unknown_argument() {
        assert_eq!(
            parse(&["--fps", "60"]).unwrap_err(),
            UsageError::UnknownArgument("--fps".to_owned())
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_usage_errors() {
        use std::os::unix::ffi::OsStringExt;

        let flag = OsString::from_vec(b"--\xff\xfe".to_vec());
        assert!(matches!(
            parse_args([flag]),
            Err(UsageError::InvalidArgument { .. })
        ));

        let value = OsString::from_vec(b"1\xff".to_vec());
        let err = parse_args([OsString::from("--frames"), value]).unwrap_err();
        assert_eq!(
            err,
            UsageError::InvalidArgument {
                lossy: "1\u{fffd}".to_owned()
            }
        );
    }

    #[test]
    fn help_flags() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--frames", "2", "-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn usage_mentions_every_option() {
        for needle in ["--frames", "--help", "BUFFALO_DISPLAY_DRIVER"] {
            assert!(USAGE.contains(needle), "usage is missing {needle}");
        }
    }
}
