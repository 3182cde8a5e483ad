//! # HTTP Server
//!
//! Wraps the resource router in the rewrite, delay, logging and CORS
//! layers and serves it.

use std::path::Path;
use std::sync::Arc;

use axum::http::HeaderName;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::ServerConfig;
use super::errors::{ServerError, ServerResult};
use super::middleware::{delay_response, log_request, rewrite_request};
use super::routes::{resource_routes, ResourceState};
use crate::observability::{log_event_with_fields, Event};
use crate::query::{LINK_HEADER, TOTAL_COUNT_HEADER};
use crate::rewrite::CompiledRuleset;
use crate::store::MemoryStore;

/// Mock REST server
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already loaded store and rule set
    pub fn new(config: ServerConfig, store: MemoryStore, rules: CompiledRuleset) -> Self {
        let router = Self::build_router(&config, Arc::new(store), Arc::new(rules));
        Self { config, router }
    }

    /// Load the database file and the configured rewrite rules
    pub fn from_config(config: ServerConfig, db_path: &Path) -> ServerResult<Self> {
        let store = MemoryStore::load(db_path, config.store_options())?;
        log_event_with_fields(
            Event::StoreLoaded,
            &[
                ("path", &db_path.display().to_string()),
                ("resources", &store.names().join(",")),
            ],
        );

        let rules = match &config.routes {
            Some(path) => {
                let rules = CompiledRuleset::load(path)?;
                log_event_with_fields(
                    Event::RewriteRulesCompiled,
                    &[
                        ("path", &path.display().to_string()),
                        ("rules", &rules.len().to_string()),
                    ],
                );
                rules
            }
            None => CompiledRuleset::empty(),
        };

        Ok(Self::new(config, store, rules))
    }

    /// Build the layered router.
    ///
    /// The resource router sits behind a fallback so the rewrite layer
    /// runs before it dispatches on the path.
    fn build_router(
        config: &ServerConfig,
        store: Arc<MemoryStore>,
        rules: Arc<CompiledRuleset>,
    ) -> Router {
        let resources = resource_routes(ResourceState::new(store));

        let mut router = Router::new()
            .fallback_service(resources)
            .layer(middleware::from_fn_with_state(rules, rewrite_request));

        if let Some(delay) = config.delay() {
            router = router.layer(middleware::from_fn_with_state(delay, delay_response));
        }

        if !config.quiet {
            router = router.layer(middleware::from_fn(log_request));
        }

        router.layer(Self::cors_layer(config))
    }

    fn cors_layer(config: &ServerConfig) -> CorsLayer {
        let exposed = [
            HeaderName::from_static(TOTAL_COUNT_HEADER),
            HeaderName::from_static(LINK_HEADER),
        ];

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new().allow_origin(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new().allow_origin(AllowOrigin::list(origins))
        };

        cors.allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(exposed)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> ServerResult<()> {
        let addr = self.config.socket_addr();
        log_event_with_fields(Event::ServerStart, &[("addr", &addr)]);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        let local = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or(addr);
        log_event_with_fields(Event::ServerListening, &[("addr", &local)]);

        axum::serve(listener, self.router)
            .await
            .map_err(ServerError::Serve)
    }
}
