use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(String),

    #[error("Failed to watch configuration file: {0}")]
    Watch(#[from] notify::Error),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
