//! Layout of the status line.
//!
//! # Layout
//!
//! The fixed segments are, left to right: transferred bytes, speed, elapsed
//! time, transfer index, and the scan segment with its spinner. When the line
//! does not fit, segments are dropped from the left, so the scan segment
//! survives longest. An empty transfer index keeps its slot and its gap.
//! Whatever space is left is given to a progress bar of up
//! to 30 cells, or to a bare percentage when the bar would be too cramped.
//!
//! # Invariants
//!
//! - The visible length of the composed line never exceeds the column count.
//! - A narrower terminal never brings back a segment a wider one dropped.
//! - The filled cell count stays within `[0, bar width]`.

use std::time::Duration;

use crate::snapshot::ProgressSnapshot;
use crate::style::StatusStyle;
use crate::terminal::{clear_to_end_of_line, cursor_right};


const TRANSFERRED_WIDTH: usize = 11;
const SPEED_WIDTH: usize = 14;
const MAX_BAR_WIDTH: usize = 30;
/// Brackets plus the five-column percentage that follows the bar.
const BAR_DECORATION: usize = 7;
const PERCENT_WIDTH: usize = 5;
const MIN_BAR_COLUMNS: usize = 12;
const FILLED_GLYPH: &str = "#";
const EMPTY_GLYPH: &str = ":";
const DELIMITER_GLYPH: &str = "|";

/// Whether the status line is redrawn in place or appended.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RenderMode {
    /// Redraw a single line in place.
    #[default]
    Interactive,
    /// Append a fresh line per update, for consumers that only read the last line.
    StatusOnly,
}

/// Composed status line, before framing for a particular render mode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusLine {
    /// Line content with style tokens embedded.
    pub text: String,
    /// Number of filled bar cells; zero when no bar is shown.
    pub filled_cells: usize,
}

enum Segment {
    Text(String),
    /// Scan text followed by one column reserved for the spinner.
    Scan(String),
}

impl Segment {
    fn width(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Scan(text) => text.chars().count() + 1,
        }
    }
}

/// Sum of segment widths plus one gap per segment.
fn occupied(segments: &[Segment]) -> usize {
    segments.iter().map(Segment::width).sum::<usize>() + segments.len()
}

/// Formats elapsed time as `H:MM:SS`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Spinner frame for the given elapsed time.
pub fn spinner_frame(elapsed: Duration, frames: &[&'static str]) -> &'static str {
    if frames.is_empty() {
        return "";
    }
    frames[(elapsed.as_secs() % frames.len() as u64) as usize]
}

/// `percent` limited to `[0, 1]`; NaN counts as zero.
fn clamp_fraction(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 1.0)
    }
}

/// Whole percentage of `fraction`, clamped to `0..=100`. Halves round up.
pub(crate) fn whole_percent(fraction: f64) -> u64 {
    (clamp_fraction(fraction) * 100.0).round() as u64
}

/// Number of filled cells for a bar of `width` cells.
pub fn filled_cells(percent: f64, width: usize) -> usize {
    ((clamp_fraction(percent) * width as f64).round() as usize).min(width)
}

fn percent_label(percent: f64) -> String {
    format!("{:>4}%", whole_percent(percent))
}

/// Builds the fixed segments and drops them from the left until they fit.
fn fit_segments(snapshot: &ProgressSnapshot, columns: usize, elapsed: Duration) -> Vec<Segment> {
    let mut segments = vec![
        Segment::Text(format!(
            "{:>width$}",
            snapshot.transferred,
            width = TRANSFERRED_WIDTH
        )),
        Segment::Text(format!("{:>width$}", snapshot.speed, width = SPEED_WIDTH)),
        Segment::Text(format_elapsed(elapsed)),
        Segment::Text(snapshot.transfer_index.clone()),
        Segment::Scan(format!("scan {}", snapshot.scan)),
    ];

    let fit_from = (0..=segments.len())
        .find(|&start| occupied(&segments[start..]) <= columns)
        .unwrap_or(segments.len());
    segments.drain(..fit_from);
    segments
}

/// Lays out `snapshot` into at most `columns` visible columns.
pub fn compose_status(
    snapshot: &ProgressSnapshot,
    style: &StatusStyle,
    columns: usize,
    elapsed: Duration,
) -> StatusLine {
    let segments = fit_segments(snapshot, columns, elapsed);

    let mut remaining = columns.saturating_sub(occupied(&segments));
    let mut filled = 0;
    let mut parts: Vec<String> = Vec::with_capacity(segments.len() + 1);

    if remaining > MIN_BAR_COLUMNS {
        let width = (remaining - BAR_DECORATION).min(MAX_BAR_WIDTH);
        filled = filled_cells(snapshot.percent, width);
        parts.push(format!(
            "{empty}[{full}{}{empty}{}]{text}{}",
            FILLED_GLYPH.repeat(filled),
            EMPTY_GLYPH.repeat(width - filled),
            percent_label(snapshot.percent),
            empty = style.bar_empty,
            full = style.bar_filled,
            text = style.text,
        ));
        remaining -= width + BAR_DECORATION;
    } else if remaining > PERCENT_WIDTH {
        parts.push(percent_label(snapshot.percent));
        remaining -= PERCENT_WIDTH;
    }

    let spinner = if snapshot.scan_finished {
        ""
    } else {
        spinner_frame(elapsed, style.frames)
    };
    parts.extend(segments.into_iter().map(|segment| match segment {
        Segment::Text(text) => text,
        Segment::Scan(text) => format!("{text}{}{spinner}{}", style.spinner, style.text),
    }));

    let compact = format!("{}{}{}", style.dim, DELIMITER_GLYPH, style.text);
    let delimiter = if remaining > parts.len().saturating_sub(1) * 2 {
        format!(" {compact} ")
    } else {
        compact
    };

    StatusLine {
        text: parts.join(&delimiter),
        filled_cells: filled,
    }
}

/// Frames a composed line for `mode`.
///
/// Interactive output returns to column zero, overwrites the line, clears the
/// rest of it and parks the cursor on the last filled bar cell. Status-only
/// output starts a new line instead.
pub fn frame_status(line: &StatusLine, style: &StatusStyle, mode: RenderMode) -> String {
    match mode {
        RenderMode::Interactive => format!(
            "\r{}{}{}\r{}{}",
            style.background,
            line.text,
            clear_to_end_of_line(),
            cursor_right(line.filled_cells),
            style.reset,
        ),
        RenderMode::StatusOnly => format!("\r\n{}{}{}", style.background, line.text, style.reset),
    }
}
