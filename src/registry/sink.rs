//! Seam between the registry and the logging backend it fronts.

use thiserror::Error;

use crate::registry::level::Level;

/// Error pushing levels into the logging backend.
#[derive(Debug, Error)]
#[error("failed to apply log levels: {0}")]
pub struct SinkError(pub String);

/// Receives the registry's configured levels after every change.
///
/// `configured` holds every logger with an explicit level, `ROOT` included
/// when it has one. Implementations must not call back into the registry.
pub trait LevelSink: Send + Sync {
    fn apply(&self, default_level: Level, configured: &[(String, Level)]) -> Result<(), SinkError>;
}
