//! Delimiting of the raw rsync output stream into logical units.
//!
//! rsync redraws its progress line with `\r` and prints file names and
//! diagnostics terminated by `\n`. The splitter keeps a single accumulator and
//! cuts it on either terminator, or when the event loop reports that the
//! stream went quiet (see [`LineSplitter::flush_idle`]).

/// How a logical unit should be interpreted by the monitor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnitHint {
    /// Terminated by `\r` or flushed by the inactivity timer.
    Status,
    /// Terminated by `\n` or flushed at end of stream.
    Plain,
}

/// One delimiter- or timeout-bounded chunk of the stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogicalUnit {
    bytes: Vec<u8>,
    hint: UnitHint,
}

impl LogicalUnit {
    /// Creates a unit from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>, hint: UnitHint) -> Self {
        Self {
            bytes: bytes.into(),
            hint,
        }
    }

    /// Raw bytes, without the terminating delimiter.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Classification derived from the delimiter.
    pub const fn hint(&self) -> UnitHint {
        self.hint
    }

    /// Returns `true` when the unit was cut as a status update.
    pub const fn is_status_hint(&self) -> bool {
        matches!(self.hint, UnitHint::Status)
    }
}

/// Byte-at-a-time state machine behind the event loop.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    /// Creates an empty splitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes accumulated since the last cut.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Feeds one byte, returning a unit when the byte is a terminator.
    ///
    /// After a `\r` cut the accumulator is seeded with `\r`, so whatever
    /// follows is recognisable as a continuation of an in-place line.
    pub fn push(&mut self, byte: u8) -> Option<LogicalUnit> {
        match byte {
            b'\r' => {
                let unit = self.take(UnitHint::Status);
                self.buffer.push(b'\r');
                Some(unit)
            }
            b'\n' => Some(self.take(UnitHint::Plain)),
            _ => {
                self.buffer.push(byte);
                None
            }
        }
    }

    /// Handles an inactivity timeout.
    ///
    /// A non-empty accumulator is assumed to hold a status line rsync is still
    /// writing and is cut as a status unit. `None` means nothing was pending
    /// and the caller should simply redraw.
    pub fn flush_idle(&mut self) -> Option<LogicalUnit> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.take(UnitHint::Status))
        }
    }

    /// Cuts whatever remains at end of stream as a plain unit.
    pub fn finish(&mut self) -> LogicalUnit {
        self.take(UnitHint::Plain)
    }

    fn take(&mut self, hint: UnitHint) -> LogicalUnit {
        LogicalUnit::new(std::mem::take(&mut self.buffer), hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_all(input: &[u8]) -> (Vec<LogicalUnit>, LineSplitter) {
        let mut splitter = LineSplitter::new();
        let units = input.iter().filter_map(|&b| splitter.push(b)).collect();
        (units, splitter)
    }

    #[test]
    fn newline_cuts_plain_unit() {
        let (units, splitter) = split_all(b"file.txt\n");
        assert_eq!(units, vec![LogicalUnit::new(b"file.txt".to_vec(), UnitHint::Plain)]);
        assert!(splitter.pending().is_empty());
    }

    #[test]
    fn carriage_return_cuts_status_unit_and_seeds_accumulator() {
        let (units, splitter) = split_all(b"  1.00M  10%\r");
        assert_eq!(units.len(), 1);
        assert!(units[0].is_status_hint());
        assert_eq!(units[0].bytes(), b"  1.00M  10%");
        assert_eq!(splitter.pending(), b"\r");
    }

    #[test]
    fn interleaved_fragments_keep_order_and_classification() {
        let (units, mut splitter) = split_all(b"a/b.txt\n 1M 1%\r 2M 2%\rc.txt\n");
        let tail = splitter.finish();

        let hints: Vec<UnitHint> = units.iter().map(LogicalUnit::hint).collect();
        assert_eq!(
            hints,
            vec![UnitHint::Plain, UnitHint::Status, UnitHint::Status, UnitHint::Plain]
        );

        let rebuilt: Vec<u8> = units
            .iter()
            .chain(std::iter::once(&tail))
            .flat_map(|unit| unit.bytes().iter().copied())
            .filter(|&b| b != b'\r')
            .collect();
        assert_eq!(rebuilt, b"a/b.txt 1M 1% 2M 2%c.txt".to_vec());
    }

    #[test]
    fn idle_flush_emits_pending_bytes_once() {
        let (_, mut splitter) = split_all(b" 3M 3%");
        let unit = splitter.flush_idle().expect("pending bytes");
        assert_eq!(unit, LogicalUnit::new(b" 3M 3%".to_vec(), UnitHint::Status));
        assert!(splitter.pending().is_empty());
        assert!(splitter.flush_idle().is_none());
    }

    #[test]
    fn finish_emits_plain_unit_even_when_empty() {
        let mut splitter = LineSplitter::new();
        let unit = splitter.finish();
        assert_eq!(unit.hint(), UnitHint::Plain);
        assert!(unit.bytes().is_empty());
    }
}
