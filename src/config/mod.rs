//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!
//! On file change (--watch):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → HttpServer applies logger categories to the registry
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; no file at all is a valid setup
//! - Only logger categories are applied live; listener and base path changes
//!   need a restart

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    LimitsConfig, ListenerConfig, LogFormat, LoggingUiConfig, ObservabilityConfig, ServiceConfig,
    TimeoutConfig,
};
pub use watcher::ConfigWatcher;
