//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (JSON or pretty)
//! - Keep the active filter behind a reload handle
//! - Apply registry level changes to that filter at runtime
//!
//! # Design Decisions
//! - `RUST_LOG` directives are read once at startup and kept as a base;
//!   directives built from the registry are added after them, so a level set
//!   through the API always wins for its target
//! - The global default directive always comes from the registry (`ROOT`'s
//!   configured level, else the registry default)

use std::sync::Arc;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::observability::discovery::{target_for_logger_name, TargetDiscovery};
use crate::registry::{Level, LevelSink, SinkError, ROOT};

/// Handles produced by [`init_logging`].
pub struct LoggingHandles {
    pub sink: Arc<TracingLevelSink>,
    pub discovery: TargetDiscovery,
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig, default_level: Level) -> Result<LoggingHandles, TryInitError> {
    let base_directives = env_directives();
    let (filter, _) = build_filter(default_level, &base_directives, &[]);
    let (filter_layer, handle) = reload::Layer::new(filter);
    let discovery = TargetDiscovery::new();

    let json = matches!(config.format, LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
    });
    let pretty = matches!(config.format, LogFormat::Pretty).then(fmt::layer);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(discovery.layer())
        .with(json)
        .with(pretty)
        .try_init()?;

    Ok(LoggingHandles {
        sink: Arc::new(TracingLevelSink {
            handle,
            base_directives,
        }),
        discovery,
    })
}

/// Applies registry levels to the live tracing filter.
pub struct TracingLevelSink {
    handle: reload::Handle<EnvFilter, Registry>,
    base_directives: Vec<String>,
}

impl LevelSink for TracingLevelSink {
    fn apply(&self, default_level: Level, configured: &[(String, Level)]) -> Result<(), SinkError> {
        let (filter, skipped) = build_filter(default_level, &self.base_directives, configured);
        self.handle
            .reload(filter)
            .map_err(|e| SinkError(e.to_string()))?;

        if skipped.is_empty() {
            Ok(())
        } else {
            Err(SinkError(format!(
                "not valid as tracing targets: {}",
                skipped.join(", ")
            )))
        }
    }
}

/// Build the filter for a registry snapshot.
///
/// Returns the filter and the logger names that could not be expressed as a
/// directive.
pub fn build_filter(
    default_level: Level,
    base_directives: &[String],
    configured: &[(String, Level)],
) -> (EnvFilter, Vec<String>) {
    let mut filter = EnvFilter::builder().parse_lossy(base_directives.join(","));

    let root_level = configured
        .iter()
        .find(|(name, _)| name == ROOT)
        .map_or(default_level, |(_, level)| *level);
    filter = filter.add_directive(root_level.to_level_filter().into());

    let mut skipped = Vec::new();
    for (name, level) in configured.iter().filter(|(name, _)| name != ROOT) {
        match directive_for(name, *level) {
            Some(directive) => filter = filter.add_directive(directive),
            None => skipped.push(name.clone()),
        }
    }
    (filter, skipped)
}

fn directive_for(name: &str, level: Level) -> Option<Directive> {
    if name.is_empty() || name.contains(['=', ',', '[', ']', '{', '}', ' ']) {
        return None;
    }
    format!("{}={}", target_for_logger_name(name), level.to_level_filter())
        .parse()
        .ok()
}

fn env_directives() -> Vec<String> {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
