//! Terminal seam used by the monitor for width queries and output.

use std::fmt;
use std::io::{self, Write};

use crossterm::Command;
use crossterm::cursor::MoveRight;
use crossterm::terminal::{Clear, ClearType};
use is_terminal::IsTerminal;

/// Width assumed when the output is not a terminal or the size query fails.
pub const DEFAULT_COLUMNS: usize = 80;

/// Destination of the status line.
pub trait Terminal {
    /// Current width in columns. Queried before every redraw.
    fn columns(&self) -> usize;

    /// Writes `text` verbatim and flushes it.
    fn write_str(&mut self, text: &str) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Width {
    Probe,
    Fixed(usize),
}

/// [`Terminal`] over any writer.
///
/// [`Console::stdout`] queries the real terminal size on each redraw when
/// stdout is a terminal; [`Console::fixed`] reports a constant width, which is
/// what tests and pipes want.
#[derive(Debug)]
pub struct Console<W> {
    out: W,
    width: Width,
}

impl Console<io::Stdout> {
    /// Console writing to the process stdout.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let attached = out.is_terminal();
        Self::new(out, attached)
    }
}

impl<W: Write> Console<W> {
    /// Console over `out`, probing the terminal size only when `attached`.
    ///
    /// `out` is expected to end up on the process stdout; the size query
    /// always refers to the controlling terminal.
    pub const fn new(out: W, attached: bool) -> Self {
        let width = if attached {
            Width::Probe
        } else {
            Width::Fixed(DEFAULT_COLUMNS)
        };
        Self { out, width }
    }

    /// Console with a constant width.
    pub const fn fixed(out: W, columns: usize) -> Self {
        Self {
            out,
            width: Width::Fixed(columns),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Borrows the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Terminal for Console<W> {
    fn columns(&self) -> usize {
        match self.width {
            Width::Fixed(columns) => columns,
            Width::Probe => crossterm::terminal::size()
                .map(|(columns, _rows)| usize::from(columns))
                .unwrap_or(DEFAULT_COLUMNS),
        }
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

/// Control sequence clearing from the cursor to the end of the line.
pub fn clear_to_end_of_line() -> String {
    ansi(Clear(ClearType::UntilNewLine))
}

/// `count` single-column cursor-right moves.
pub fn cursor_right(count: usize) -> String {
    ansi(MoveRight(1)).repeat(count)
}

fn ansi(command: impl Command) -> String {
    let mut sequence = String::new();
    match command.write_ansi(&mut sequence) {
        Ok(()) => sequence,
        Err(fmt::Error) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_console_reports_configured_width() {
        let console = Console::fixed(Vec::new(), 42);
        assert_eq!(console.columns(), 42);
    }

    #[test]
    fn detached_console_uses_default_width() {
        let console = Console::new(Vec::new(), false);
        assert_eq!(console.columns(), DEFAULT_COLUMNS);
    }

    #[test]
    fn write_str_appends_verbatim() {
        let mut console = Console::fixed(Vec::new(), 80);
        console.write_str("\rone").expect("write");
        console.write_str("two\r\n").expect("write");
        assert_eq!(console.into_inner(), b"\ronetwo\r\n");
    }

    #[test]
    fn control_sequences_are_ansi() {
        assert_eq!(clear_to_end_of_line(), "\x1b[K");
        assert_eq!(cursor_right(0), "");
        assert_eq!(cursor_right(3), "\x1b[1C\x1b[1C\x1b[1C");
    }
}
