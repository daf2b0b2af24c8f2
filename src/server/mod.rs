pub mod handler;
pub mod response;

use crate::adapters::build_fetcher;
use crate::engine::ExtractionEngine;
use crate::{Config, Error, Result};
use axum::Router;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub use handler::{router, AppState};
pub use response::ResponseEnvelope;

pub struct Server {
    config: Arc<Config>,
    engine: Arc<ExtractionEngine>,
    cancellation_token: CancellationToken,
}

impl Server {
    /// Build the fetch strategy and engine described by `config`
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = build_fetcher(&config)?;
        let engine = ExtractionEngine::new(fetcher, &config)?;
        Ok(Self::with_engine(config, Arc::new(engine)))
    }

    #[must_use]
    pub fn with_engine(config: Config, engine: Arc<ExtractionEngine>) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            cancellation_token: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.engine))
    }

    /// Token that stops the server when cancelled
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub async fn run(&self) -> Result<()> {
        let address = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&address).await?;
        info!("Listening on http://{}", listener.local_addr()?);

        tokio::spawn(wait_for_signal(self.cancellation_token.clone()));
        self.serve(listener).await
    }

    /// Serve on an already bound listener until the shutdown token fires
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let shutdown = self.cancellation_token.clone();
        let server = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .into_future();
        let mut server = std::pin::pin!(server);

        tokio::select! {
            result = &mut server => {
                info!("Server stopped");
                return result.map_err(Error::from);
            }
            () = self.cancellation_token.cancelled() => {}
        }

        info!("Shutdown signal received, draining connections");
        let grace =
            std::time::Duration::from_secs(self.config.server.graceful_shutdown_timeout_secs);
        let result = match tokio::time::timeout(grace, server).await {
            Ok(result) => result.map_err(Error::from),
            Err(_) => {
                warn!("Graceful shutdown timeout exceeded, forcing shutdown");
                Ok(())
            }
        };

        info!("Server shutdown complete");
        result
    }
}

async fn wait_for_signal(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                error!("Failed to set up SIGTERM handler: {}", e);
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
            _ = tokio::signal::ctrl_c() => info!("Received SIGINT, initiating graceful shutdown"),
        }
    }

    #[cfg(not(unix))]
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C, initiating graceful shutdown");
    }

    token.cancel();
}
