//! Logging UI service
//!
//! Serves the logger-level API for the running process.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET  {base}            ┌─────────────┐     ┌───────────────┐
//!     GET  {base}/{logger}   │    admin    │────▶│ QueryService  │──┐
//!     ───────────────────────▶   router    │     └───────────────┘  │
//!     POST {base}/{logger}   │             │     ┌───────────────┐  ▼
//!                            └─────────────┘────▶│MutationService│─▶ LoggerRegistry
//!                                                └───────────────┘       │
//!     config file ──▶ watcher ──▶ reload ─────────────────────────────────┤
//!                                                                         ▼
//!                                                        TracingLevelSink (EnvFilter reload)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use logging_ui::config::{load_config, ConfigWatcher, ServiceConfig};
use logging_ui::error::ServiceError;
use logging_ui::lifecycle::{startup, Shutdown};
use logging_ui::observability::{init_logging, metrics};
use logging_ui::registry::LevelSink;
use logging_ui::HttpServer;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "logging-ui")]
#[command(about = "Inspect and change logger levels of a running service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload logger categories when the configuration file changes
    #[arg(short, long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    let logging = init_logging(&config.observability, config.logging_ui.default_level)
        .map_err(|e| ServiceError::Logging(e.to_string()))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "logging-ui starting"
    );

    let sink: Arc<dyn LevelSink> = logging.sink.clone();
    let registry = startup::build_registry(&config.logging_ui, Some(sink));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e: std::net::AddrParseError| ServiceError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(|e| ServiceError::Metrics(e.to_string()))?;
    }

    // The watcher stops when dropped; keep it for the lifetime of the server.
    let (_watcher, config_updates) = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| ServiceError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let signal_task = shutdown.trigger_on_signal();

    let server = HttpServer::new(config, registry, Some(logging.discovery));
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    signal_task.abort();
    tracing::info!("Shutdown complete");
    Ok(())
}
