//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured events through a reloadable filter)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! The subscriber feeds back:
//!     → discovery.rs (callsite targets become known loggers)
//!     → logging.rs TracingLevelSink (registry levels rewrite the filter)
//! ```

pub mod discovery;
pub mod logging;
pub mod metrics;

pub use discovery::TargetDiscovery;
pub use logging::{init_logging, LoggingHandles, TracingLevelSink};
