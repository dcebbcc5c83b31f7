//! Terminal cleanup on SIGINT and SIGTERM.

use rsyncy_monitor::{StatusStyle, clear_to_end_of_line};

/// Exit status used after an interrupt.
pub const ABORT_EXIT_CODE: i32 = 1;

/// Text written to stdout when the user aborts.
pub fn abort_text(style: &StatusStyle) -> String {
    format!("{}\r{}\r\naborted\r\n", style.reset, clear_to_end_of_line())
}

/// Installs the interrupt handler thread.
///
/// On delivery of SIGINT or SIGTERM the handler resets the styling, leaves
/// the status line and exits the process with [`ABORT_EXIT_CODE`].
#[cfg(unix)]
pub fn install(style: &StatusStyle) -> std::io::Result<()> {
    use std::io::Write;

    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let text = abort_text(style);
    std::thread::Builder::new()
        .name("rsyncy-signals".to_owned())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::debug!(target: "rsyncy::signal", signal, "interrupted");
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(text.as_bytes());
                let _ = stdout.flush();
                std::process::exit(ABORT_EXIT_CODE);
            }
        })?;
    Ok(())
}

/// No handler is installed on this platform.
#[cfg(not(unix))]
pub fn install(_style: &StatusStyle) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_text_resets_and_clears_line() {
        let text = abort_text(&StatusStyle::palette_256());
        assert_eq!(text, "\x1b[0m\r\x1b[K\r\naborted\r\n");
    }

    #[test]
    fn plain_abort_text_has_no_styling() {
        assert_eq!(abort_text(&StatusStyle::plain()), "\r\x1b[K\r\naborted\r\n");
    }
}
