//! Color tokens used when composing the status line.
//!
//! The renderer treats every token as an opaque string and only splices them
//! between visible characters; none of them occupy a terminal column.

use std::env;

use anstyle::{Ansi256Color, AnsiColor, Color, Reset, Style};

/// Spinner frames shown while the file-list check is still running.
pub const SPINNER_FRAMES: &[&str] = &["-", "\\", "|", "/"];

/// Color capability of the attached terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum ColorDepth {
    /// 16 system colors.
    Ansi16,
    /// xterm 256-color palette.
    Ansi256,
    /// 24-bit color.
    TrueColor,
}

impl ColorDepth {
    /// Derives the color depth from `COLORTERM` and `TERM` values.
    pub fn from_env_values(colorterm: Option<&str>, term: Option<&str>) -> Self {
        let colorterm = colorterm.unwrap_or_default();
        let term = term.unwrap_or_default();
        if matches!(colorterm, "truecolor" | "24bit") {
            Self::TrueColor
        } else if colorterm == "8bit" || term.contains("256") {
            Self::Ansi256
        } else {
            Self::Ansi16
        }
    }

    /// Reads `COLORTERM` and `TERM` from the process environment.
    pub fn detect() -> Self {
        let colorterm = env::var("COLORTERM").ok();
        let term = env::var("TERM").ok();
        Self::from_env_values(colorterm.as_deref(), term.as_deref())
    }

    /// Number of color bits the depth represents.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Ansi16 => 4,
            Self::Ansi256 => 8,
            Self::TrueColor => 24,
        }
    }
}

/// Style tokens for one status line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusStyle {
    /// Background applied to the whole line.
    pub background: String,
    /// Delimiter tone.
    pub dim: String,
    /// Regular text tone.
    pub text: String,
    /// Bar brackets and unfilled cells.
    pub bar_empty: String,
    /// Filled bar cells.
    pub bar_filled: String,
    /// Spinner glyph tone.
    pub spinner: String,
    /// Resets all attributes.
    pub reset: String,
    /// Spinner animation frames.
    pub frames: &'static [&'static str],
}

impl StatusStyle {
    /// Picks the palette that matches `depth`.
    pub fn for_depth(depth: ColorDepth) -> Self {
        if depth >= ColorDepth::Ansi256 {
            Self::palette_256()
        } else {
            Self::palette_16()
        }
    }

    /// Tokens for terminals with at least 256 colors.
    pub fn palette_256() -> Self {
        Self::from_styles(
            Style::new().bg_color(Some(xterm(238))),
            Style::new().fg_color(Some(xterm(241))),
            Style::new().fg_color(Some(xterm(250))),
            Style::new().fg_color(Some(xterm(243))),
            Style::new().fg_color(Some(xterm(43))),
            Style::new().fg_color(Some(xterm(228))).bold(),
        )
    }

    /// Tokens for 16-color terminals.
    pub fn palette_16() -> Self {
        Self::from_styles(
            Style::new().bg_color(Some(Color::Ansi(AnsiColor::White))),
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))),
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::Black))),
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))),
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::Black))),
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightCyan))).bold(),
        )
    }

    /// Empty tokens; the composed line then contains only visible text.
    pub fn plain() -> Self {
        Self {
            background: String::new(),
            dim: String::new(),
            text: String::new(),
            bar_empty: String::new(),
            bar_filled: String::new(),
            spinner: String::new(),
            reset: String::new(),
            frames: SPINNER_FRAMES,
        }
    }

    fn from_styles(
        background: Style,
        dim: Style,
        text: Style,
        bar_empty: Style,
        bar_filled: Style,
        spinner: Style,
    ) -> Self {
        Self {
            background: background.render().to_string(),
            dim: dim.render().to_string(),
            text: text.render().to_string(),
            bar_empty: bar_empty.render().to_string(),
            bar_filled: bar_filled.render().to_string(),
            spinner: spinner.render().to_string(),
            reset: Reset.render().to_string(),
            frames: SPINNER_FRAMES,
        }
    }
}

impl Default for StatusStyle {
    fn default() -> Self {
        Self::plain()
    }
}

const fn xterm(index: u8) -> Color {
    Color::Ansi256(Ansi256Color(index))
}
