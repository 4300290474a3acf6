//! Registry construction and configuration reload.

use std::sync::Arc;

use crate::config::{LoggingUiConfig, ServiceConfig};
use crate::registry::{LevelSink, LoggerRegistry};

/// Build the registry described by `config`.
///
/// Preregistered loggers are listed from the start, configured categories
/// are applied, and the sink (if any) receives the resulting levels once.
pub fn build_registry(
    config: &LoggingUiConfig,
    sink: Option<Arc<dyn LevelSink>>,
) -> Arc<LoggerRegistry> {
    let mut registry = LoggerRegistry::new(config.default_level);
    if let Some(sink) = sink {
        registry = registry.with_sink(sink);
    }

    let added = registry.register(config.preregistered.iter());
    for (name, level) in &config.categories {
        registry.set_configured_level(name, *level);
    }

    if let Err(e) = registry.sync_sink() {
        tracing::warn!(error = %e, "Some configured levels could not be applied to the log output");
    }

    tracing::info!(
        preregistered = added,
        categories = config.categories.len(),
        default_level = %config.default_level,
        "Logger registry ready"
    );
    Arc::new(registry)
}

/// Apply a reloaded configuration to a running registry.
///
/// Categories that are new or changed are set; categories that disappeared
/// are reset so their loggers inherit again. Settings that only take effect
/// at startup are reported and otherwise ignored.
pub fn apply_reload(registry: &LoggerRegistry, current: &ServiceConfig, next: &ServiceConfig) {
    let old = &current.logging_ui;
    let new = &next.logging_ui;

    registry.register(new.preregistered.iter());

    let mut changed = 0usize;
    for (name, level) in &new.categories {
        if old.categories.get(name) != Some(level) {
            registry.set_configured_level(name, *level);
            changed += 1;
        }
    }
    for name in old.categories.keys() {
        if !new.categories.contains_key(name) {
            registry.clear_configured_level(name);
            changed += 1;
        }
    }

    if current.listener.bind_address != next.listener.bind_address {
        tracing::warn!(
            current = %current.listener.bind_address,
            requested = %next.listener.bind_address,
            "Bind address change requires a restart"
        );
    }
    if old.normalized_base_path() != new.normalized_base_path() {
        tracing::warn!(
            current = %old.normalized_base_path(),
            requested = %new.normalized_base_path(),
            "Base path change requires a restart"
        );
    }
    if old.default_level != new.default_level {
        tracing::warn!(
            current = %old.default_level,
            requested = %new.default_level,
            "Default level change requires a restart"
        );
    }

    tracing::info!(changed, "Configuration reload applied");
}
