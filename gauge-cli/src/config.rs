//! Environment configuration
//!
//! - `GAUGE_LOG`: log level, falling back to `RUST_LOG`, then `info`
//! - `GAUGE_PRECISION`: decimals for the `display` field of results

use std::env;
use tracing::Level;

const DEFAULT_LEVEL: Level = Level::INFO;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: Level,
    pub precision: Option<usize>,
    /// Problems found while reading the environment, logged once the
    /// subscriber is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config { log_level: DEFAULT_LEVEL, precision: None, warnings: Vec::new() }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(raw) = lookup("GAUGE_LOG").or_else(|| lookup("RUST_LOG")) {
            match raw.trim().parse::<Level>() {
                Ok(level) => config.log_level = level,
                Err(_) => config.warnings.push(format!(
                    "ignoring log level '{}', using {}", raw, DEFAULT_LEVEL
                )),
            }
        }

        if let Some(raw) = lookup("GAUGE_PRECISION") {
            match raw.trim().parse::<usize>() {
                Ok(precision) => config.precision = Some(precision),
                Err(_) => config.warnings.push(format!(
                    "ignoring GAUGE_PRECISION '{}', expected a non-negative integer", raw
                )),
            }
        }

        config
    }

    /// Render a displayable value with the configured precision
    pub fn display<T: std::fmt::Display>(&self, value: &T) -> String {
        match self.precision {
            Some(precision) => format!("{:.*}", precision, value),
            None => value.to_string(),
        }
    }
}
