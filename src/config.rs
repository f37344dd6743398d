use thiserror::Error;
use tracing::Level;

use crate::interpreter::value::precision::{DEFAULT_PRECISION, MAX_PRECISION};

/// Session settings.
///
/// # Example
/// ```
/// use clicalc::config::Config;
///
/// let config = Config { precision: 50, ..Config::default() };
/// assert!(config.validate().is_ok());
///
/// let config = Config { precision: 0, ..Config::default() };
/// assert!(config.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Significant digits of float results.
    pub precision: u32,
    /// Seed of the `rand` generator; entropy when `None`.
    pub seed:      Option<u64>,
    /// Log verbosity: 0 warnings, 1 info, 2 debug, 3 or more trace.
    pub verbose:   u8,
}

impl Default for Config {
    fn default() -> Self {
        Self { precision: DEFAULT_PRECISION,
               seed:      None,
               verbose:   0, }
    }
}

/// Invalid session settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested precision is outside the supported range.
    #[error("precision must be between 1 and {MAX_PRECISION} digits, got {0}")]
    Precision(u32),
}

impl Config {
    /// Checks that every setting is within its supported range.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(ConfigError::Precision(self.precision));
        }
        Ok(())
    }

    /// Maps the verbosity count to the most detailed level that is logged.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
