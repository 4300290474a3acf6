//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use logging_ui::config::ServiceConfig;
use logging_ui::http::HttpServer;
use logging_ui::lifecycle::{startup, Shutdown};
use logging_ui::registry::LoggerRegistry;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A service running on an ephemeral local port.
pub struct RunningService {
    pub addr: SocketAddr,
    pub registry: Arc<LoggerRegistry>,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<ServiceConfig>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningService {
    /// Base URL of the logger API, base path included.
    pub fn base_url(&self, config: &ServiceConfig) -> url::Url {
        let base = config.logging_ui.normalized_base_path();
        url::Url::parse(&format!("http://{}{}", self.addr, base)).unwrap()
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .unwrap()
            .unwrap();
    }
}

/// Config with a short drain period, suitable for tests.
pub fn test_config(base_path: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.logging_ui.base_path = base_path.to_string();
    config.timeouts.shutdown_secs = 1;
    config
}

/// Start the full server for `config` on 127.0.0.1:0.
pub async fn spawn_service(config: ServiceConfig) -> RunningService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let registry = startup::build_registry(&config.logging_ui, None);
    let shutdown = Shutdown::new();
    let (updates, update_rx) = mpsc::unbounded_channel();

    let server = HttpServer::new(config, registry.clone(), None);
    let handle = tokio::spawn(server.run(listener, update_rx, shutdown.subscribe()));

    RunningService {
        addr,
        registry,
        shutdown,
        updates,
        handle,
    }
}

/// Poll `check` until it holds or a second has passed.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
