//! Write side of the logger API.

use std::sync::Arc;

use crate::observability::metrics;
use crate::registry::{InvalidLevel, Level, LevelChange, LoggerRegistry};

/// Validates and applies level changes.
#[derive(Debug, Clone)]
pub struct MutationService {
    registry: Arc<LoggerRegistry>,
}

impl MutationService {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }

    /// Set `logger` to the level named by `level_text`.
    ///
    /// Nothing changes when the text is not a level.
    pub fn set_level(&self, logger: &str, level_text: &str) -> Result<LevelChange, InvalidLevel> {
        let level: Level = level_text.parse().inspect_err(|e| {
            tracing::warn!(logger = %logger, error = %e, "Rejected level change");
        })?;
        let change = self.registry.set_configured_level(logger, level);
        Self::report(&change);
        Ok(change)
    }

    /// Drop `logger`'s configured level so it inherits again.
    pub fn reset_level(&self, logger: &str) -> LevelChange {
        let change = self.registry.clear_configured_level(logger);
        Self::report(&change);
        change
    }

    /// `Some` sets the level, `None` resets it.
    pub fn apply(&self, logger: &str, level_text: Option<&str>) -> Result<LevelChange, InvalidLevel> {
        match level_text {
            Some(text) => self.set_level(logger, text),
            None => Ok(self.reset_level(logger)),
        }
    }

    fn report(change: &LevelChange) {
        metrics::record_level_change(change);
        tracing::info!(
            logger = %change.logger,
            previous = ?change.previous,
            current = ?change.current,
            recomputed = change.recomputed,
            "Log level changed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (Arc<LoggerRegistry>, MutationService) {
        let registry = Arc::new(LoggerRegistry::new(Level::Info));
        (registry.clone(), MutationService::new(registry))
    }

    #[test]
    fn test_set_level_canonicalizes_case() {
        let (registry, mutations) = service();
        let change = mutations.set_level("orders.io.loggers", "trace").unwrap();
        assert_eq!(change.current, Some(Level::Trace));

        let entry = registry.resolve("orders.io.loggers");
        assert_eq!(entry.configured_level, Some(Level::Trace));
        assert_eq!(entry.effective_level, Level::Trace);
    }

    #[test]
    fn test_invalid_level_leaves_registry_untouched() {
        let (registry, mutations) = service();
        mutations.set_level("app", "WARN").unwrap();
        let before = registry.list_all();

        let err = mutations.set_level("app", "non-existing").unwrap_err();
        assert_eq!(err.0, "non-existing");
        assert_eq!(registry.list_all(), before);

        assert!(mutations.set_level("fresh", "nope").is_err());
        assert!(!registry.list_all().contains_key("fresh"));
    }

    #[test]
    fn test_apply_none_resets() {
        let (registry, mutations) = service();
        mutations.apply("app", Some("debug")).unwrap();
        let change = mutations.apply("app", None).unwrap();
        assert_eq!(change.previous, Some(Level::Debug));
        assert_eq!(registry.resolve("app").configured_level, None);
    }
}
