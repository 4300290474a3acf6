//! Logger severity levels.
//!
//! # Design Decisions
//! - Fixed set of nine names, declared from least to most verbose
//! - Parsing folds case; any other difference, whitespace included, is rejected
//! - Serialized as the canonical upper-case name

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Requested level text does not name any known level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid log level '{0}'")]
pub struct InvalidLevel(pub String);

/// A logger severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Level {
    Off,
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Config,
    Debug,
    Trace,
    All,
}

impl Level {
    /// Every level, in declaration order.
    pub const ALL: [Level; 9] = [
        Level::Off,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Config,
        Level::Debug,
        Level::Trace,
        Level::All,
    ];

    /// Canonical names of every level, in declaration order.
    pub fn all_names() -> [&'static str; 9] {
        Self::ALL.map(Level::as_str)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Off => "OFF",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Config => "CONFIG",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
            Level::All => "ALL",
        }
    }

    /// The tracing filter this level enables.
    ///
    /// tracing has five levels, so FATAL folds into ERROR, CONFIG into INFO
    /// and ALL into TRACE.
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            Level::Off => LevelFilter::OFF,
            Level::Fatal | Level::Error => LevelFilter::ERROR,
            Level::Warn => LevelFilter::WARN,
            Level::Info | Level::Config => LevelFilter::INFO,
            Level::Debug => LevelFilter::DEBUG,
            Level::Trace | Level::All => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = InvalidLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidLevel(s.to_string()))
    }
}

impl TryFrom<String> for Level {
    type Error = InvalidLevel;

    fn try_from(value: String) -> Result<Self, InvalidLevel> {
        value.parse()
    }
}

impl From<Level> for &'static str {
    fn from(level: Level) -> Self {
        level.as_str()
    }
}
