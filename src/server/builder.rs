//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_payment_routes};
use crate::config::DashboardConfig;
use crate::core::service::PaymentRepository;
use crate::storage::InMemoryPaymentStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard HTTP server
///
/// Without an explicit repository, `build` creates an
/// [`InMemoryPaymentStore`] simulating the configured backend.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(DashboardConfig::from_yaml_file("config/dashboard.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    repository: Option<Arc<dyn PaymentRepository>>,
    config: DashboardConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            repository: None,
            config: DashboardConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the payment repository
    pub fn with_repository(self, repository: impl PaymentRepository + 'static) -> Self {
        self.with_shared_repository(Arc::new(repository))
    }

    /// Set a repository that is also used outside the server
    pub fn with_shared_repository(mut self, repository: Arc<dyn PaymentRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;

        let repository = match self.repository {
            Some(repository) => repository,
            None => {
                tracing::info!(
                    failure_rate = self.config.simulation.failure_rate,
                    latency = self.config.simulation.enabled,
                    "using simulated in-memory payment store"
                );
                Arc::new(InMemoryPaymentStore::from_config(&self.config.simulation))
            }
        };

        let mut app = build_health_routes().merge(build_payment_routes(AppState { repository }));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_repository(InMemoryPaymentStore::new())
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix
///
/// A signal that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown requested, draining connections");
}
