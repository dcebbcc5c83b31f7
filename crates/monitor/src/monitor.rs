//! Orchestration of parsing, filtering, and redrawing.

use std::io::Read;
use std::time::{Duration, Instant};

use crate::config::MonitorConfig;
use crate::error::{MonitorError, OutputResultExt};
use crate::event_loop::{EventLoop, UnitHandler};
use crate::parser::parse_status_line;
use crate::render::{compose_status, frame_status};
use crate::snapshot::ProgressSnapshot;
use crate::splitter::LogicalUnit;
use crate::terminal::{Terminal, clear_to_end_of_line};

/// Render bookkeeping owned by the monitor.
#[derive(Clone, Copy, Debug)]
pub struct RenderState {
    started: Instant,
    last_filled_cells: usize,
}

impl RenderState {
    /// Starts the elapsed-time clock at `started`.
    pub const fn new(started: Instant) -> Self {
        Self {
            started,
            last_filled_cells: 0,
        }
    }

    /// Time since the monitor started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Filled bar cells of the most recent redraw.
    pub const fn last_filled_cells(&self) -> usize {
        self.last_filled_cells
    }
}

/// Routes logical units to the parser and the terminal.
///
/// The monitor owns the current [`ProgressSnapshot`]; every successfully
/// parsed status line is merged into it, and every change ends with a redraw
/// of the status line. File names rsync prints are passed through above the
/// status line, except for directory entries, which are dropped.
#[derive(Debug)]
pub struct Monitor<T> {
    terminal: T,
    config: MonitorConfig,
    snapshot: ProgressSnapshot,
    state: RenderState,
}

impl<T: Terminal> Monitor<T> {
    /// Creates a monitor whose elapsed-time clock starts now.
    pub fn new(terminal: T, config: MonitorConfig) -> Self {
        Self::with_start(terminal, config, Instant::now())
    }

    /// Creates a monitor with an explicit process start instant.
    pub fn with_start(terminal: T, config: MonitorConfig, started: Instant) -> Self {
        Self {
            terminal,
            config,
            snapshot: ProgressSnapshot::default(),
            state: RenderState::new(started),
        }
    }

    /// Runs the event loop over `source` until it ends.
    pub fn run<R: Read + Send + 'static>(&mut self, source: R) -> Result<(), MonitorError> {
        EventLoop::from_config(&self.config).run(source, self)
    }

    /// Current snapshot.
    pub const fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    /// Render bookkeeping.
    pub const fn render_state(&self) -> &RenderState {
        &self.state
    }

    /// Borrows the terminal.
    pub const fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Returns the terminal, consuming the monitor.
    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Handles one logical unit.
    pub fn handle_unit(&mut self, unit: &LogicalUnit) -> Result<(), MonitorError> {
        let decoded = String::from_utf8_lossy(unit.bytes());
        let line = decoded.trim();
        if line.is_empty() {
            return Ok(());
        }

        let status_only = self.config.is_status_only();
        let is_status = unit.is_status_hint() || unit.bytes().first() == Some(&b'\r');

        if is_status {
            match parse_status_line(line) {
                Some(update) => self.snapshot.apply(update, self.config.scan_retention),
                None if !status_only => self.print_line(line)?,
                None => {}
            }
            self.redraw()
        } else if line.ends_with('/') {
            tracing::trace!(target: "rsyncy::filter", entry = line, "skipping directory");
            Ok(())
        } else if status_only {
            Ok(())
        } else {
            self.print_line(line)?;
            self.redraw()
        }
    }

    /// Redraws the status line from the current snapshot.
    pub fn redraw(&mut self) -> Result<(), MonitorError> {
        let columns = self.terminal.columns();
        let line = compose_status(
            &self.snapshot,
            &self.config.style,
            columns,
            self.state.elapsed(),
        );
        self.state.last_filled_cells = line.filled_cells;
        let framed = frame_status(&line, &self.config.style, self.config.mode);
        self.terminal.write_str(&framed).output_context()
    }

    /// Moves past the status line once the stream has ended.
    pub fn finish(&mut self) -> Result<(), MonitorError> {
        let text = format!("\r{}\r\n", clear_to_end_of_line());
        self.terminal.write_str(&text).output_context()
    }

    fn print_line(&mut self, line: &str) -> Result<(), MonitorError> {
        let text = format!("\r{line}{}\r\n", clear_to_end_of_line());
        self.terminal.write_str(&text).output_context()
    }
}

impl<T: Terminal> UnitHandler for Monitor<T> {
    fn on_unit(&mut self, unit: &LogicalUnit) -> Result<(), MonitorError> {
        self.handle_unit(unit)
    }

    fn on_idle(&mut self) -> Result<(), MonitorError> {
        self.redraw()
    }

    fn on_end(&mut self) -> Result<(), MonitorError> {
        self.finish()
    }
}
