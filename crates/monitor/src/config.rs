//! Monitor configuration.

use std::time::Duration;

use crate::render::RenderMode;
use crate::snapshot::ScanRetention;
use crate::style::StatusStyle;

/// Quiet period after which a pending partial line is treated as a status update.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(200);

/// Capacity of the byte queue between the reader thread and the event loop.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Settings shared by the event loop and the monitor.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// In-place redraw or append-only output.
    pub mode: RenderMode,
    /// Color tokens.
    pub style: StatusStyle,
    /// Scan label behavior for lines without a usable check token.
    pub scan_retention: ScanRetention,
    /// Inactivity window of the event loop.
    pub quiescence: Duration,
    /// Bounded queue capacity; a full queue blocks the reader thread.
    pub queue_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            style: StatusStyle::default(),
            scan_retention: ScanRetention::default(),
            quiescence: DEFAULT_QUIESCENCE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl MonitorConfig {
    /// Sets the render mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the style tokens.
    pub fn with_style(mut self, style: StatusStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the scan label retention policy.
    pub fn with_scan_retention(mut self, retention: ScanRetention) -> Self {
        self.scan_retention = retention;
        self
    }

    /// Sets the inactivity window.
    pub fn with_quiescence(mut self, quiescence: Duration) -> Self {
        self.quiescence = quiescence;
        self
    }

    /// Sets the queue capacity. Zero is raised to one.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Returns `true` in append-only mode.
    pub fn is_status_only(&self) -> bool {
        self.mode == RenderMode::StatusOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rsync_progress_cadence() {
        let config = MonitorConfig::default();
        assert_eq!(config.mode, RenderMode::Interactive);
        assert_eq!(config.quiescence, Duration::from_millis(200));
        assert_eq!(config.queue_capacity, 1024);
        assert_eq!(config.scan_retention, ScanRetention::SourceCompatible);
        assert!(!config.is_status_only());
    }

    #[test]
    fn builders_override_fields() {
        let config = MonitorConfig::default()
            .with_mode(RenderMode::StatusOnly)
            .with_scan_retention(ScanRetention::Retain)
            .with_quiescence(Duration::from_millis(5))
            .with_queue_capacity(0);
        assert!(config.is_status_only());
        assert_eq!(config.scan_retention, ScanRetention::Retain);
        assert_eq!(config.quiescence, Duration::from_millis(5));
        assert_eq!(config.queue_capacity, 1);
    }
}
