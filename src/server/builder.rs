//! ServerBuilder for fluent API to build the HTTP server

use super::handlers::SalesState;
use super::router::{build_sales_routes, build_service_routes};
use crate::core::{SaleRepository, SaleService, SaleServiceImpl};
use anyhow::Result;
use axum::Router;
use axum::http::{Method, header};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for the sales HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_repository(Arc::new(InMemorySaleRepository::new()), None)
///     .build()?;
/// ```
pub struct ServerBuilder {
    service: Option<Arc<dyn SaleService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            service: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the sale service (required)
    pub fn with_service(mut self, service: Arc<dyn SaleService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Use the default [`SaleServiceImpl`] over `repository`
    pub fn with_repository(
        self,
        repository: Arc<dyn SaleRepository>,
        store_timeout: Option<Duration>,
    ) -> Self {
        let service = SaleServiceImpl::new(repository).with_store_timeout(store_timeout);
        self.with_service(Arc::new(service))
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    ///
    /// Welcome/health routes, the `/api/v1/sales` routes and any custom
    /// routes, wrapped in request tracing and a permissive CORS policy.
    pub fn build(self) -> Result<Router> {
        let service = self
            .service
            .ok_or_else(|| anyhow::anyhow!("SaleService is required. Call .with_service()"))?;

        let mut app = build_service_routes().merge(build_sales_routes(SalesState::new(service)));

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

        Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr` and stops on SIGTERM or Ctrl+C.
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

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
