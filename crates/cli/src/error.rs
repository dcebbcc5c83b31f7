//! Front-end failures.

use std::io;

use rsyncy_monitor::MonitorError;

/// Errors surfaced by [`crate::run`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The rsync process could not be started.
    #[error("failed to run rsync: {0}")]
    Spawn(#[source] io::Error),
    /// Waiting for rsync to exit failed.
    #[error("failed to wait for rsync: {0}")]
    Wait(#[source] io::Error),
    /// The status monitor stopped with an error.
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    /// The command line could not be parsed.
    #[error("{0}")]
    Arguments(#[from] clap::Error),
}

impl CliError {
    /// Process exit code reported for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Spawn(_) | Self::Wait(_) | Self::Monitor(_) | Self::Arguments(_) => 1,
        }
    }
}
