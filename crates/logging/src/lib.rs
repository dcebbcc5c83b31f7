#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rsyncy_logging` installs the process-wide `tracing` subscriber used for
//! rsyncy's own diagnostics. Those diagnostics go to stderr so they never
//! interleave with the status line drawn on stdout.
//!
//! # Design
//!
//! - [`LogConfig`] names the default level and the environment variable
//!   ([`LOG_ENV_VAR`]) whose directives override it.
//! - [`init_tracing`] layers an `EnvFilter` under a plain-text `fmt` layer
//!   without timestamps or ANSI colors.
//!
//! # Errors
//!
//! [`LoggingError::InvalidFilter`] is returned for malformed directives and
//! [`LoggingError::AlreadyInitialised`] when a global subscriber exists.
//!
//! # Examples
//!
//! ```
//! use rsyncy_logging::{LogConfig, init_tracing};
//!
//! let config = LogConfig::default();
//! let _ = init_tracing(&config);
//! tracing::warn!(target: "rsyncy::example", "visible on stderr");
//! ```

mod config;

use std::io;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

pub use config::{LOG_ENV_VAR, LogConfig};

/// Failures while installing the diagnostic subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter '{directives}': {source}")]
    InvalidFilter {
        /// Directives as supplied.
        directives: String,
        /// Parser diagnostic.
        #[source]
        source: ParseError,
    },
    /// A global subscriber was already installed.
    #[error("tracing subscriber already initialised: {0}")]
    AlreadyInitialised(#[source] TryInitError),
}

/// Installs the global subscriber described by `config`.
pub fn init_tracing(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = config.filter()?;
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(false)
        .without_time()
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(LoggingError::AlreadyInitialised)
}
