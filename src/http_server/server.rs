//! # HTTP Server
//!
//! Combines the client and health routers behind one CORS layer and serves
//! them until a shutdown signal arrives.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::BoardApi;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::storage::RecordStore;

use super::client_routes::client_routes;
use super::config::HttpServerConfig;
use super::observability_routes::health_routes;

/// HTTP server for the board
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new<S>(config: HttpServerConfig, api: Arc<BoardApi<S>>) -> Self
    where
        S: RecordStore + 'static,
    {
        let router = build_router(&config, api);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serves until `shutdown` resolves, then lets in-flight requests finish
    pub async fn start<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::Serving, &[("addr", addr.to_string().as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Build the combined router with all endpoints
pub fn build_router<S>(config: &HttpServerConfig, api: Arc<BoardApi<S>>) -> Router
where
    S: RecordStore + 'static,
{
    // No configured origins means any origin
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(health_routes())
        .merge(client_routes(api))
        .layer(cors)
}

/// Resolves on ctrl-c, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            Logger::warn(
                "SIGNAL_HANDLER_FAILED",
                &[("error", e.to_string().as_str()), ("signal", "SIGINT")],
            );
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                Logger::warn(
                    "SIGNAL_HANDLER_FAILED",
                    &[("error", e.to_string().as_str()), ("signal", "SIGTERM")],
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    log_event_with_fields(Event::ShutdownStart, &[("signal", received)]);
}
