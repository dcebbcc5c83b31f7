//! Error types for the monitor pipeline.

use std::io;

/// Failures that stop the monitor event loop.
///
/// Parsing anomalies never surface here; they are logged and absorbed by the
/// parser. Only problems with the surrounding I/O end the loop early.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Writing to the terminal failed.
    #[error("failed to write status output: {0}")]
    Output(#[source] io::Error),

    /// The background reader thread could not be started.
    #[error("failed to start input reader thread: {0}")]
    SpawnReader(#[source] io::Error),
}

/// Extension trait for tagging terminal write failures.
pub(crate) trait OutputResultExt<T> {
    /// Maps an I/O error to [`MonitorError::Output`].
    fn output_context(self) -> Result<T, MonitorError>;
}

impl<T> OutputResultExt<T> for io::Result<T> {
    fn output_context(self) -> Result<T, MonitorError> {
        self.map_err(MonitorError::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_error_mentions_status_output() {
        let error = MonitorError::Output(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let display = format!("{error}");
        assert!(display.contains("status output"));
        assert!(display.contains("pipe closed"));
    }

    #[test]
    fn output_context_wraps_io_errors() {
        let result: io::Result<()> = Err(io::Error::other("boom"));
        let mapped = result.output_context();
        assert!(matches!(mapped, Err(MonitorError::Output(_))));
    }
}
