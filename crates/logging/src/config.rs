//! crates/logging/src/config.rs
//! Log level configuration and filter construction.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::LoggingError;

/// Environment variable holding `tracing` filter directives.
pub const LOG_ENV_VAR: &str = "RSYNCY_LOG";

/// Where diagnostics are filtered.
///
/// Directives from the environment take precedence over the default level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    /// Level used when the environment variable is unset or empty.
    pub default_level: LevelFilter,
    /// Name of the environment variable consulted for directives.
    pub env_var: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: LevelFilter::WARN,
            env_var: LOG_ENV_VAR,
        }
    }
}

impl LogConfig {
    /// Builds the filter from an explicit environment value.
    pub fn filter_from(&self, env_value: Option<&str>) -> Result<EnvFilter, LoggingError> {
        match env_value.map(str::trim) {
            Some(directives) if !directives.is_empty() => {
                EnvFilter::try_new(directives).map_err(|source| LoggingError::InvalidFilter {
                    directives: directives.to_owned(),
                    source,
                })
            }
            _ => Ok(EnvFilter::default().add_directive(self.default_level.into())),
        }
    }

    /// Builds the filter from the process environment.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        let value = std::env::var(self.env_var).ok();
        self.filter_from(value.as_deref())
    }
}
