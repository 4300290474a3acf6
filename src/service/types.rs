//! Wire types shared by the services, the HTTP layer and clients.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::{Level, LoggerEntry};

/// One logger's levels as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerDescription {
    /// `null` when the logger inherits.
    pub configured_level: Option<Level>,
    pub effective_level: Level,
}

impl From<LoggerEntry> for LoggerDescription {
    fn from(entry: LoggerEntry) -> Self {
        Self {
            configured_level: entry.configured_level,
            effective_level: entry.effective_level,
        }
    }
}

/// Body of every query response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerLevelsResponse {
    /// The full level enumeration, in declaration order.
    pub levels: Vec<Level>,
    /// Logger name → levels.
    pub loggers: BTreeMap<String, LoggerDescription>,
}

impl LoggerLevelsResponse {
    pub fn new(loggers: BTreeMap<String, LoggerDescription>) -> Self {
        Self {
            levels: Level::ALL.to_vec(),
            loggers,
        }
    }
}

/// Body of a level change request. A missing or `null` level resets the logger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelChangeRequest {
    #[serde(default)]
    pub configured_level: Option<String>,
}
