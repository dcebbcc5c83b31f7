#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rsyncy_cli` is the command-line front-end shared by the `rsyncy` and
//! `rsyncy-stat` binaries. It forwards the user's arguments to `rsync`, asks
//! rsync for whole-transfer progress, and hands rsync's stdout to
//! [`rsyncy_monitor::Monitor`], which draws the status line.
//!
//! # Design
//!
//! [`run`] is the single entry point. It accepts the full argument vector
//! together with handles for standard output and error:
//!
//! 1. The program name selects the render mode: names ending in
//!    `rsyncy-stat` append one status line per update instead of redrawing.
//! 2. All other arguments are passed to rsync untouched, including `--help`
//!    and `--version`.
//! 3. Without arguments, stdin is monitored instead (`rsync ... | rsyncy`),
//!    unless stdin is a terminal, in which case a short usage banner is
//!    printed.
//! 4. SIGINT and SIGTERM reset the terminal styling and exit with status 1.
//!
//! # Errors
//!
//! Failures are reported on stderr prefixed with `rsyncy:` and mapped to
//! exit code `1` through [`CliError::exit_code`]. When rsync runs, its own
//! exit code becomes the process exit code.
//!
//! # Examples
//!
//! ```
//! use rsyncy_cli::test_utils::parse_args;
//! use rsyncy_monitor::RenderMode;
//!
//! let invocation = parse_args(["rsyncy-stat", "-a", "src/", "host:dst"]).unwrap();
//! assert_eq!(invocation.mode, RenderMode::StatusOnly);
//! assert_eq!(invocation.rsync_args.len(), 3);
//! ```

mod error;
mod interrupt;
mod invocation;
mod launch;

use std::ffi::{OsStr, OsString};
use std::io::{self, Read, Write};

use is_terminal::IsTerminal;
use rsyncy_logging::{LogConfig, LoggingError, init_tracing};
use rsyncy_monitor::{ColorDepth, Console, Monitor, MonitorConfig, StatusStyle};

pub use error::CliError;
pub use interrupt::{ABORT_EXIT_CODE, abort_text};
pub use invocation::{Invocation, STATUS_ONLY_SUFFIX, mode_for_program};
pub use launch::{PROGRESS_ARGS, RSYNC_PROGRAM};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Prefix for diagnostics written to stderr.
const DIAGNOSTIC_PREFIX: &str = "rsyncy";

/// Banner printed when rsyncy is started without arguments on a terminal.
const HELP_TEXT: &str = concat!(
    "rsyncy is an rsync wrapper with a progress bar.\n",
    "Please specify your rsync options as you normally would but use rsyncy instead of rsync.\n",
);

/// Helpers exposed for integration tests.
#[doc(hidden)]
pub mod test_utils {
    pub use crate::invocation::parse_args;
}

/// Standard input as seen by the front-end.
struct Input<R> {
    reader: R,
    is_terminal: bool,
}

/// Runs the front-end and returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let invocation = match invocation::parse_args(arguments) {
        Ok(invocation) => invocation,
        Err(error) => return report(&CliError::from(error), stderr),
    };

    init_logging(stderr);

    let style = StatusStyle::for_depth(ColorDepth::detect());
    if let Err(error) = interrupt::install(&style) {
        tracing::warn!(target: "rsyncy::signal", %error, "interrupt handler not installed");
    }

    let config = MonitorConfig::default()
        .with_mode(invocation.mode)
        .with_style(style);
    let stdin = io::stdin();
    let input = Input {
        is_terminal: stdin.is_terminal(),
        reader: stdin,
    };
    let stdout_attached = io::stdout().is_terminal();

    execute(&invocation, config, input, stdout_attached, stdout, stderr)
}

fn execute<R, Out, Err>(
    invocation: &Invocation,
    config: MonitorConfig,
    input: Input<R>,
    stdout_attached: bool,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    R: Read + Send + 'static,
    Out: Write,
    Err: Write,
{
    if invocation.rsync_args.is_empty() && input.is_terminal {
        return match stdout.write_all(HELP_TEXT.as_bytes()) {
            Ok(()) => 0,
            Err(_) => 1,
        };
    }

    let mut monitor = Monitor::new(Console::new(&mut *stdout, stdout_attached), config);
    let result = if invocation.rsync_args.is_empty() {
        tracing::debug!(target: "rsyncy::launch", "monitoring stdin");
        monitor
            .run(input.reader)
            .map(|()| 0)
            .map_err(CliError::from)
    } else {
        launch::launch(
            OsStr::new(RSYNC_PROGRAM),
            &invocation.rsync_args,
            &mut monitor,
        )
    };

    match result {
        Ok(code) => code,
        Err(error) => report(&error, stderr),
    }
}

fn init_logging<Err: Write>(stderr: &mut Err) {
    match init_tracing(&LogConfig::default()) {
        Ok(()) | Err(LoggingError::AlreadyInitialised(_)) => {}
        Err(error) => {
            let _ = writeln!(stderr, "{DIAGNOSTIC_PREFIX}: {error}");
        }
    }
}

fn report<Err: Write>(error: &CliError, stderr: &mut Err) -> i32 {
    let _ = writeln!(stderr, "{DIAGNOSTIC_PREFIX}: {error}");
    error.exit_code()
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rsyncy_monitor::RenderMode;

    const SESSION: &[u8] = b"sending incremental file list\n\
        photos/\n\
        photos/beach.jpg\n\
        \r    3.93M   5%  128.19kB/s    0:00:29 (xfr#208, ir-chk=2587/2821)\r";

    fn invocation(mode: RenderMode, args: &[&str]) -> Invocation {
        Invocation {
            mode,
            rsync_args: args.iter().map(OsString::from).collect(),
        }
    }

    fn plain_config(mode: RenderMode) -> MonitorConfig {
        MonitorConfig::default()
            .with_mode(mode)
            .with_style(StatusStyle::plain())
    }

    fn piped(reader: &'static [u8]) -> Input<&'static [u8]> {
        Input {
            reader,
            is_terminal: false,
        }
    }

    #[test]
    fn banner_is_printed_for_terminal_without_arguments() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let input = Input {
            reader: &b""[..],
            is_terminal: true,
        };
        let code = execute(
            &invocation(RenderMode::Interactive, &[]),
            plain_config(RenderMode::Interactive),
            input,
            false,
            &mut stdout,
            &mut stderr,
        );

        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(stdout).expect("utf8"), HELP_TEXT);
        assert!(stderr.is_empty());
    }

    #[test]
    fn piped_stdin_is_monitored() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = execute(
            &invocation(RenderMode::Interactive, &[]),
            plain_config(RenderMode::Interactive),
            piped(SESSION),
            false,
            &mut stdout,
            &mut stderr,
        );

        assert_eq!(code, 0);
        let written = String::from_utf8(stdout).expect("utf8");
        assert!(written.contains("\rphotos/beach.jpg\x1b[K\r\n"));
        assert!(!written.contains("photos/\x1b[K"));
        assert!(written.contains("#208"));
        assert!(written.contains("scan 8% (2821)"));
        assert!(written.ends_with("\r\x1b[K\r\n"));
    }

    #[test]
    fn status_only_pipe_omits_file_names() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = execute(
            &invocation(RenderMode::StatusOnly, &[]),
            plain_config(RenderMode::StatusOnly),
            piped(SESSION),
            false,
            &mut stdout,
            &mut stderr,
        );

        assert_eq!(code, 0);
        let written = String::from_utf8(stdout).expect("utf8");
        assert!(!written.contains("beach.jpg"));
        assert!(!written.contains("sending incremental"));
        assert!(written.contains("3.93M"));
    }

    #[test]
    fn exit_codes_are_clamped() {
        assert_eq!(exit_code_from(0), std::process::ExitCode::SUCCESS);
        assert_eq!(exit_code_from(-4), std::process::ExitCode::from(0));
        assert_eq!(exit_code_from(23), std::process::ExitCode::from(23));
        assert_eq!(exit_code_from(999), std::process::ExitCode::from(255));
    }
}
