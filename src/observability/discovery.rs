//! Logger discovery from tracing callsites.
//!
//! Every callsite the process registers carries a target (normally a module
//! path). The discovery layer records those targets so the registry can list
//! the loggers that actually exist in the running process, not only the ones
//! somebody has asked about.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::subscriber::Interest;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::layer::Layer;

use crate::registry::LoggerRegistry;

/// Logger name for a tracing target: `a::b` becomes `a.b`.
pub fn logger_name_for_target(target: &str) -> String {
    target.replace("::", ".")
}

/// Tracing target for a logger name: `a.b` becomes `a::b`.
pub fn target_for_logger_name(name: &str) -> String {
    name.replace('.', "::")
}

/// Shared set of targets seen but not yet handed to the registry.
#[derive(Debug, Clone, Default)]
pub struct TargetDiscovery {
    pending: Arc<Mutex<BTreeSet<String>>>,
}

impl TargetDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer that feeds this discovery set.
    pub fn layer(&self) -> DiscoveryLayer {
        DiscoveryLayer {
            discovery: self.clone(),
        }
    }

    pub fn record(&self, target: &str) {
        self.lock().insert(logger_name_for_target(target));
    }

    /// Move pending targets into `registry`. Returns how many were new to it.
    pub fn drain_into(&self, registry: &LoggerRegistry) -> usize {
        // Taken before touching the registry so the two locks never nest.
        let pending = std::mem::take(&mut *self.lock());
        if pending.is_empty() {
            return 0;
        }
        registry.register(pending)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Records callsite targets; never affects filtering.
#[derive(Debug, Clone)]
pub struct DiscoveryLayer {
    discovery: TargetDiscovery,
}

impl<S: Subscriber> Layer<S> for DiscoveryLayer {
    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        self.discovery.record(metadata.target());
        Interest::always()
    }
}
