//! Read side of the logger API.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::observability::{metrics, TargetDiscovery};
use crate::registry::{name, LoggerRegistry};
use crate::service::types::{LoggerDescription, LoggerLevelsResponse};

/// Answers "which loggers exist and at what level".
#[derive(Debug, Clone)]
pub struct QueryService {
    registry: Arc<LoggerRegistry>,
    discovery: Option<TargetDiscovery>,
}

impl QueryService {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self {
            registry,
            discovery: None,
        }
    }

    /// Fold loggers seen by the tracing subscriber into every listing.
    pub fn with_discovery(mut self, discovery: TargetDiscovery) -> Self {
        self.discovery = Some(discovery);
        self
    }

    /// Every known logger.
    pub fn describe_all(&self) -> LoggerLevelsResponse {
        if let Some(discovery) = &self.discovery {
            discovery.drain_into(&self.registry);
        }

        let loggers: BTreeMap<String, LoggerDescription> = self
            .registry
            .list_all()
            .into_iter()
            .map(|(name, entry)| (name, entry.into()))
            .collect();
        metrics::record_known_loggers(loggers.len());
        LoggerLevelsResponse::new(loggers)
    }

    /// Exactly one logger, created on first reference.
    pub fn describe_one(&self, logger: &str) -> LoggerLevelsResponse {
        let entry = self.registry.resolve(logger);
        let key = name::canonical(logger).to_string();
        LoggerLevelsResponse::new(BTreeMap::from([(key, entry.into())]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Level, ROOT};

    #[test]
    fn test_describe_all_lists_levels_and_loggers() {
        let registry = Arc::new(LoggerRegistry::new(Level::Info));
        registry.register(["logging_ui"]);
        let queries = QueryService::new(registry);

        let response = queries.describe_all();
        assert_eq!(response.levels.len(), 9);
        assert!(response.loggers.len() > 1);
        assert!(response.loggers.contains_key(ROOT));
    }

    #[test]
    fn test_describe_all_does_not_grow_registry() {
        let registry = Arc::new(LoggerRegistry::new(Level::Info));
        let queries = QueryService::new(registry.clone());
        queries.describe_all();
        queries.describe_all();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_describe_one_has_single_key() {
        let registry = Arc::new(LoggerRegistry::new(Level::Info));
        let queries = QueryService::new(registry.clone());

        let response = queries.describe_one("Test2io.acme");
        assert_eq!(response.levels, Level::ALL.to_vec());
        assert_eq!(response.loggers.len(), 1);
        let description = response.loggers["Test2io.acme"];
        assert_eq!(description.configured_level, None);
        assert_eq!(description.effective_level, Level::Info);

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_describe_all_includes_discovered_targets() {
        let registry = Arc::new(LoggerRegistry::new(Level::Info));
        let discovery = TargetDiscovery::new();
        discovery.record("app::worker");
        let queries = QueryService::new(registry).with_discovery(discovery);

        let response = queries.describe_all();
        assert!(response.loggers.contains_key("app.worker"));
    }
}
