//! ServerBuilder for fluent API to build HTTP servers with slug routing

use super::middleware::{render_matched_route, slug_route_layer};
use crate::config::RoutingConfig;
use crate::core::error::{RoutingError, RoutingResult};
use crate::core::locale::{LocaleContext, LocaleProvider};
use crate::core::repository::EntityRepository;
use crate::routing::provider::{RouteProvider, SlugRouteProvider};
use anyhow::Result;
use axum::Router;
use axum::middleware::from_fn_with_state;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder wiring configuration, repositories and locales into a router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config_file("config/routing.yaml")?
///     .register_repository("product", products)
///     .register_repository("taxon", taxons)
///     .with_locale_provider(StaticLocaleProvider::new(["en", "fr"], "en"))
///     .build()?;
/// ```
pub struct ServerBuilder {
    configs: Vec<RoutingConfig>,
    repositories: Vec<(String, Arc<dyn EntityRepository>)>,
    locale_provider: Option<Arc<dyn LocaleProvider>>,
    locale_context: Option<Arc<dyn LocaleContext>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            configs: Vec::new(),
            repositories: Vec::new(),
            locale_provider: None,
            locale_context: None,
            custom_routes: Vec::new(),
        }
    }

    /// Add a routing configuration
    ///
    /// Several configurations are merged in the order they were added.
    pub fn with_config(mut self, config: RoutingConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Load and add a routing configuration from a YAML file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> RoutingResult<Self> {
        let config = RoutingConfig::from_yaml_file(path)?;
        Ok(self.with_config(config))
    }

    /// Register the repository of an entity class
    pub fn register_repository(
        self,
        class: impl Into<String>,
        repository: impl EntityRepository + 'static,
    ) -> Self {
        self.register_repository_arc(class, Arc::new(repository))
    }

    /// Register an already shared repository
    pub fn register_repository_arc(
        mut self,
        class: impl Into<String>,
        repository: Arc<dyn EntityRepository>,
    ) -> Self {
        self.repositories.push((class.into(), repository));
        self
    }

    /// Set the locale provider (required)
    pub fn with_locale_provider(mut self, provider: impl LocaleProvider + 'static) -> Self {
        self.locale_provider = Some(Arc::new(provider));
        self
    }

    /// Set the locale context
    pub fn with_locale_context(mut self, context: impl LocaleContext + 'static) -> Self {
        self.locale_context = Some(Arc::new(context));
        self
    }

    /// Add application routes
    ///
    /// Handlers can read `MatchedRoute` and `ResolvedLocale` from the
    /// request extensions.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the route provider alone
    pub fn build_provider(&mut self) -> RoutingResult<SlugRouteProvider> {
        let config = RoutingConfig::merge(std::mem::take(&mut self.configs));
        let mut builder = SlugRouteProvider::builder(config);

        for (class, repository) in std::mem::take(&mut self.repositories) {
            builder = builder.register_repository(class, repository)?;
        }

        let locale_provider = self.locale_provider.take().ok_or_else(|| {
            RoutingError::invalid_argument("LocaleProvider is required. Call .with_locale_provider()")
        })?;
        builder = builder.with_locale_provider(locale_provider);
        if let Some(context) = self.locale_context.take() {
            builder = builder.with_locale_context(context);
        }

        builder.build()
    }

    /// Build the final router
    ///
    /// Custom routes are served first; any other path falls back to a JSON
    /// rendering of the matched route, or 404.
    pub fn build(mut self) -> RoutingResult<Router> {
        let provider: Arc<dyn RouteProvider> = Arc::new(self.build_provider()?);

        let mut router = Router::new();
        for routes in std::mem::take(&mut self.custom_routes) {
            router = router.merge(routes);
        }

        Ok(router
            .fallback(render_matched_route)
            .layer(from_fn_with_state(provider, slug_route_layer))
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
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

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
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
