//! Recognition of rsync `--info=progress2` status lines.
//!
//! Two shapes are accepted:
//!
//! ```text
//!   3.93M   5%  128.19kB/s    0:00:29
//!   3.93M   5%  128.19kB/s    0:00:29 (xfr#208, ir-chk=2587/2821)
//! ```
//!
//! The time column is ignored; the monitor measures elapsed time itself.

use std::sync::LazyLock;

use regex::Regex;

use crate::render::whole_percent;
use crate::snapshot::{ScanField, StatusUpdate};

/// Mode tag rsync uses once the file list is complete.
const FINISHED_SCAN_TAG: &str = "to";

static CHECK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(..)-.+=(\d+)/(\d+)").expect("check token pattern is valid")
});

/// Parses one candidate status line.
///
/// Returns `None` when the line is not a status line: fewer than four
/// whitespace-separated tokens, or a second token without a trailing `%`.
pub fn parse_status_line(line: &str) -> Option<StatusUpdate> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 || !tokens[1].ends_with('%') {
        return None;
    }

    let percent = parse_percent(tokens[1], line);

    let (transfer_index, scan) = if tokens.len() == 6 {
        (parse_transfer_index(tokens[4]), parse_scan(tokens[5]))
    } else {
        (None, ScanField::Missing)
    };

    Some(StatusUpdate {
        transferred: tokens[0].to_owned(),
        percent,
        speed: tokens[2].to_owned(),
        transfer_index,
        scan,
    })
}

fn parse_percent(token: &str, line: &str) -> Option<f64> {
    let digits = token.strip_suffix('%').unwrap_or(token);
    match digits.parse::<f64>() {
        Ok(value) => Some(value / 100.0),
        Err(error) => {
            tracing::warn!(
                target: "rsyncy::parse",
                token,
                line,
                %error,
                "can't parse transfer percentage"
            );
            None
        }
    }
}

/// `xfr#208,` becomes `#208`.
fn parse_transfer_index(token: &str) -> Option<String> {
    let trimmed = token.strip_suffix(',').unwrap_or(token);
    let parts: Vec<&str> = trimmed.split('#').collect();
    match parts.as_slice() {
        [_, count] => Some(format!("#{count}")),
        _ => None,
    }
}

/// `ir-chk=2587/2821)` reports remaining and total entries of the check phase.
fn parse_scan(token: &str) -> ScanField {
    let Some(captures) = CHECK_TOKEN.captures(token) else {
        return ScanField::Unrecognized;
    };

    let finished = &captures[1] == FINISHED_SCAN_TAG;
    let remaining = captures[2].parse::<u64>();
    let total = captures[3].parse::<u64>();

    let label = match (remaining, total) {
        (Ok(remaining), Ok(total)) if total > 0 => Some(scan_label(remaining, total)),
        (Ok(_), Ok(_)) => None,
        (remaining, total) => {
            tracing::debug!(
                target: "rsyncy::parse",
                token,
                remaining_ok = remaining.is_ok(),
                total_ok = total.is_ok(),
                "can't parse check counts"
            );
            None
        }
    };

    ScanField::Matched { finished, label }
}

fn scan_label(remaining: u64, total: u64) -> String {
    let done = total.saturating_sub(remaining);
    let percent = whole_percent(done as f64 / total as f64);
    format!("{percent}% ({total})")
}
