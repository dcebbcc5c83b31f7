//! Reader thread and inactivity-driven event loop.
//!
//! A single background thread performs the blocking reads and forwards bytes
//! through a bounded channel. The loop on the calling thread owns the
//! [`LineSplitter`] and the handler, so no state is shared between threads.
//! Each receive waits at most one quiescence window; since the wait restarts
//! for every byte, the timeout only fires once the stream has gone quiet.

use std::io::{self, BufReader, Read};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender, bounded};

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::splitter::{LineSplitter, LogicalUnit};

/// Receiver of the events produced by [`EventLoop::run`].
pub trait UnitHandler {
    /// A logical unit was cut from the stream.
    fn on_unit(&mut self, unit: &LogicalUnit) -> Result<(), MonitorError>;

    /// The stream was quiet and nothing was pending.
    fn on_idle(&mut self) -> Result<(), MonitorError>;

    /// The stream ended; called once after the final unit.
    fn on_end(&mut self) -> Result<(), MonitorError>;
}

enum ReaderEvent {
    Byte(u8),
    Closed(Option<io::Error>),
}

/// Drives a [`UnitHandler`] from a byte source.
#[derive(Clone, Copy, Debug)]
pub struct EventLoop {
    quiescence: Duration,
    capacity: usize,
}

impl EventLoop {
    /// Creates a loop with an explicit inactivity window and queue capacity.
    pub fn new(quiescence: Duration, capacity: usize) -> Self {
        Self {
            quiescence,
            capacity: capacity.max(1),
        }
    }

    /// Creates a loop using the timing settings of `config`.
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.quiescence, config.queue_capacity)
    }

    /// Consumes `source` until end of stream or a read error.
    ///
    /// Read errors end the stream like EOF does. Only handler failures and a
    /// failure to start the reader thread are returned.
    pub fn run<R, H>(&self, source: R, handler: &mut H) -> Result<(), MonitorError>
    where
        R: Read + Send + 'static,
        H: UnitHandler + ?Sized,
    {
        let (sender, receiver) = bounded(self.capacity);
        let reader = thread::Builder::new()
            .name("rsyncy-reader".to_owned())
            .spawn(move || forward_bytes(source, &sender))
            .map_err(MonitorError::SpawnReader)?;

        let mut splitter = LineSplitter::new();
        loop {
            match receiver.recv_timeout(self.quiescence) {
                Ok(ReaderEvent::Byte(byte)) => {
                    if let Some(unit) = splitter.push(byte) {
                        handler.on_unit(&unit)?;
                    }
                }
                Ok(ReaderEvent::Closed(error)) => {
                    if let Some(error) = error {
                        tracing::debug!(target: "rsyncy::io", %error, "input stream failed");
                    }
                    break;
                }
                Err(RecvTimeoutError::Timeout) => match splitter.flush_idle() {
                    Some(unit) => handler.on_unit(&unit)?,
                    None => handler.on_idle()?,
                },
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        handler.on_unit(&splitter.finish())?;
        handler.on_end()?;

        if reader.join().is_err() {
            tracing::debug!(target: "rsyncy::io", "input reader thread panicked");
        }
        Ok(())
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::from_config(&MonitorConfig::default())
    }
}

fn forward_bytes<R: Read>(source: R, sender: &Sender<ReaderEvent>) {
    for byte in BufReader::new(source).bytes() {
        match byte {
            Ok(byte) => {
                if sender.send(ReaderEvent::Byte(byte)).is_err() {
                    return;
                }
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => {
                let _ = sender.send(ReaderEvent::Closed(Some(error)));
                return;
            }
        }
    }
    let _ = sender.send(ReaderEvent::Closed(None));
}
