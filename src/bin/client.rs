use crate::support;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

/// Runs the shared front-end for both executables.
///
/// `rsyncy` and `rsyncy-stat` differ only in their file name, which the
/// front-end reads from the first argument to pick the render mode.
#[must_use]
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    support::dispatch(
        args,
        stdout,
        stderr,
        rsyncy_cli::run,
        rsyncy_cli::exit_code_from,
    )
}
