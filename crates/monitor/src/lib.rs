#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rsyncy_monitor` turns the raw stdout of `rsync --info=progress2` into a
//! single, continuously redrawn status line. rsync interleaves in-place
//! progress updates terminated by `\r` with file names terminated by `\n`;
//! this crate separates the two, parses the progress figures, and lays them
//! out together with a progress bar that shrinks gracefully with the terminal.
//!
//! # Design
//!
//! - [`LineSplitter`] cuts the byte stream on `\r`, `\n`, or inactivity.
//! - [`EventLoop`] runs one reader thread and feeds the splitter from a
//!   bounded channel, waking up after [`MonitorConfig::quiescence`] of silence.
//! - [`parse_status_line`] recognises the short and long progress forms and
//!   yields a [`StatusUpdate`].
//! - [`compose_status`] and [`frame_status`] are pure functions of the
//!   snapshot, the column count, and the elapsed time.
//! - [`Monitor`] owns the [`ProgressSnapshot`] and ties everything together
//!   behind the [`Terminal`] seam.
//!
//! # Invariants
//!
//! - Units are handled in the order rsync produced them.
//! - Only the event loop thread touches the snapshot and the terminal.
//! - The visible status line never exceeds the terminal width.
//!
//! # Errors
//!
//! Malformed progress fields are logged through `tracing` and otherwise
//! ignored. [`MonitorError`] is only returned when writing to the terminal
//! fails or the reader thread cannot be started.
//!
//! # Examples
//!
//! ```
//! use rsyncy_monitor::{Console, Monitor, MonitorConfig, StatusStyle};
//!
//! let config = MonitorConfig::default().with_style(StatusStyle::plain());
//! let mut monitor = Monitor::new(Console::fixed(Vec::new(), 80), config);
//!
//! let rsync_output: &[u8] = b"notes.txt\n  1.04M  96%  1.04MB/s  0:00:06\r";
//! monitor.run(rsync_output).unwrap();
//!
//! assert_eq!(monitor.snapshot().transferred, "1.04M");
//! let written = String::from_utf8(monitor.into_terminal().into_inner()).unwrap();
//! assert!(written.contains("notes.txt"));
//! ```

mod config;
mod error;
mod event_loop;
mod monitor;
mod parser;
mod render;
mod snapshot;
mod splitter;
mod style;
mod terminal;

pub use config::{DEFAULT_QUEUE_CAPACITY, DEFAULT_QUIESCENCE, MonitorConfig};
pub use error::MonitorError;
pub use event_loop::{EventLoop, UnitHandler};
pub use monitor::{Monitor, RenderState};
pub use parser::parse_status_line;
pub use render::{
    RenderMode, StatusLine, compose_status, filled_cells, format_elapsed, frame_status,
    spinner_frame,
};
pub use snapshot::{ProgressSnapshot, ScanField, ScanRetention, StatusUpdate};
pub use splitter::{LineSplitter, LogicalUnit, UnitHint};
pub use style::{ColorDepth, SPINNER_FRAMES, StatusStyle};
pub use terminal::{Console, DEFAULT_COLUMNS, Terminal, clear_to_end_of_line, cursor_right};
