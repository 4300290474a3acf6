//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the logger endpoints at the configured base path
//! - Wire up middleware (request ID, tracing, body limit, timeout, metrics)
//! - Bind server to listener
//! - Apply configuration reloads to the registry
//! - Graceful shutdown with a bounded drain

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, Notify};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::admin::setup_admin_router;
use crate::config::ServiceConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::lifecycle::{shutdown, startup};
use crate::observability::{metrics, TargetDiscovery};
use crate::registry::LoggerRegistry;
use crate::service::{MutationService, QueryService};

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub queries: QueryService,
    pub mutations: MutationService,
}

impl AppState {
    pub fn new(registry: Arc<LoggerRegistry>, discovery: Option<TargetDiscovery>) -> Self {
        let mut queries = QueryService::new(registry.clone());
        if let Some(discovery) = discovery {
            queries = queries.with_discovery(discovery);
        }
        Self {
            queries,
            mutations: MutationService::new(registry),
        }
    }
}

/// HTTP server for the logger API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    registry: Arc<LoggerRegistry>,
}

impl HttpServer {
    /// Create a new HTTP server over an already prepared registry.
    pub fn new(
        config: ServiceConfig,
        registry: Arc<LoggerRegistry>,
        discovery: Option<TargetDiscovery>,
    ) -> Self {
        let state = AppState::new(registry.clone(), discovery);
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            registry,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        setup_admin_router(&config.logging_ui.base_path, state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
            .layer(middleware::from_fn(track_requests))
    }

    /// A clone of the router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configuration updates received while running are applied to the
    /// registry. Returns once `shutdown` fires and in-flight requests have
    /// drained, or the drain deadline has passed.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.logging_ui.normalized_base_path(),
            "HTTP server starting"
        );

        let registry = self.registry.clone();
        let mut current = self.config.clone();
        let reload_task = tokio::spawn(async move {
            while let Some(next) = config_updates.recv().await {
                startup::apply_reload(&registry, &current, &next);
                current = next;
            }
        });

        let grace = Duration::from_secs(self.config.timeouts.shutdown_secs);
        let draining = Arc::new(Notify::new());
        let trigger = draining.clone();

        let server = axum::serve(listener, self.router).with_graceful_shutdown(async move {
            shutdown::wait(shutdown).await;
            trigger.notify_one();
        });

        tokio::select! {
            result = server.into_future() => result?,
            () = async {
                draining.notified().await;
                tokio::time::sleep(grace).await;
            } => {
                tracing::warn!(grace_secs = grace.as_secs(), "Shutdown grace period elapsed with requests in flight");
            }
        }

        reload_task.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request),
    )
}

async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let response = next.run(request).await;
    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}
