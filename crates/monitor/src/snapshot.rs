//! Progress snapshot owned by the monitor and the updates merged into it.

/// Latest progress figures reported by rsync.
///
/// The labels are kept exactly as rsync printed them; nothing here is ever
/// re-parsed as a number.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressSnapshot {
    /// Human-formatted byte count, e.g. `3.93M`.
    pub transferred: String,
    /// Fraction of the transfer complete, nominally in `[0.0, 1.0]`.
    pub percent: f64,
    /// Human-formatted rate, e.g. `128.19kB/s`.
    pub speed: String,
    /// Empty or `#N` with the number of completed items.
    pub transfer_index: String,
    /// Empty or `P% (T)` describing the file-list check phase.
    pub scan: String,
    /// Set once rsync reports `to-chk` instead of `ir-chk`.
    pub scan_finished: bool,
}

/// Parsed view of the sixth status token (`ir-chk=...`/`to-chk=...`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanField {
    /// Short status form; no check token at all.
    Missing,
    /// A check token was present but did not have the expected shape.
    Unrecognized,
    /// The check token matched.
    Matched {
        /// `true` for `to-chk`, `false` for the incremental `ir-chk`.
        finished: bool,
        /// Rendered `P% (T)` label, `None` when the counts were unusable.
        label: Option<String>,
    },
}

/// One parsed status line, ready to be merged into a [`ProgressSnapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct StatusUpdate {
    /// Token 0, verbatim.
    pub transferred: String,
    /// Token 1 as a fraction; `None` when the number was malformed.
    pub percent: Option<f64>,
    /// Token 2, verbatim.
    pub speed: String,
    /// `#N` from `xfr#N,` when present and well formed.
    pub transfer_index: Option<String>,
    /// State of the check token.
    pub scan: ScanField,
}

/// How the scan label reacts when a status line carries no usable check token.
///
/// rsync emits short status lines between long ones, so clearing the label on
/// every short line makes it flicker. By default a missing token leaves the
/// label alone while a present but unrecognized token clears it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScanRetention {
    /// Missing token keeps the label, unrecognized or unusable token clears it.
    #[default]
    SourceCompatible,
    /// The label only ever changes when a new, usable value arrives.
    Retain,
    /// Any line without a usable check token clears the label.
    ClearWhenAbsent,
}

impl ProgressSnapshot {
    /// Merges `update` into the snapshot field by field.
    pub fn apply(&mut self, update: StatusUpdate, retention: ScanRetention) {
        self.transferred = update.transferred;
        if let Some(percent) = update.percent {
            self.percent = percent;
        }
        self.speed = update.speed;
        if let Some(index) = update.transfer_index {
            self.transfer_index = index;
        }

        match update.scan {
            ScanField::Missing => {
                if retention == ScanRetention::ClearWhenAbsent {
                    self.scan.clear();
                }
            }
            ScanField::Unrecognized => {
                if retention != ScanRetention::Retain {
                    self.scan.clear();
                }
            }
            ScanField::Matched { finished, label } => {
                self.scan_finished = finished;
                match label {
                    Some(label) => self.scan = label,
                    None if retention != ScanRetention::Retain => self.scan.clear(),
                    None => {}
                }
            }
        }
    }
}
