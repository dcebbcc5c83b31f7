//! Spawning rsync and monitoring its output.

use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};

use rsyncy_monitor::{Monitor, Terminal};

use crate::error::CliError;

/// Program launched in launch mode.
pub const RSYNC_PROGRAM: &str = "rsync";

/// Arguments appended after the user's so rsync reports overall progress.
pub const PROGRESS_ARGS: [&str; 3] = ["--info=progress2", "--no-v", "-hv"];

/// Builds the rsync command line for `user_args`.
pub fn rsync_command(program: &OsStr, user_args: &[OsString]) -> Command {
    let mut command = Command::new(program);
    command
        .args(user_args)
        .args(PROGRESS_ARGS)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    command
}

/// Runs `program` with `user_args`, feeding its stdout into `monitor`.
///
/// Returns the child's exit code, or `1` when it ended without one.
pub fn launch<T: Terminal>(
    program: &OsStr,
    user_args: &[OsString],
    monitor: &mut Monitor<T>,
) -> Result<i32, CliError> {
    let mut child = rsync_command(program, user_args)
        .spawn()
        .map_err(CliError::Spawn)?;
    tracing::debug!(target: "rsyncy::launch", pid = child.id(), "rsync started");

    if let Some(stdout) = child.stdout.take() {
        if let Err(error) = monitor.run(stdout) {
            let _ = child.wait();
            return Err(error.into());
        }
    }

    let status = child.wait().map_err(CliError::Wait)?;
    tracing::debug!(target: "rsyncy::launch", %status, "rsync exited");
    Ok(status.code().unwrap_or(1))
}
