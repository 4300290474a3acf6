//! Runtime logger-level service.
//!
//! Keeps a registry of hierarchical logger names, each with an optional
//! configured level and an effective level inherited from the nearest
//! configured ancestor, and exposes it over HTTP.

pub mod admin;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod service;

pub use config::schema::ServiceConfig;
pub use error::ServiceError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::{Level, LoggerRegistry};
