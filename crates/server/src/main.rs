//! Quitanda - grocery delivery order pipeline.
//!
//! This binary serves the storefront and admin API on one port.
//!
//! # Architecture
//!
//! - Axum web framework, JSON API
//! - Product catalog loaded read-only from a JSON file
//! - Cart persisted as a snapshot in a local file-backed key-value store
//! - Orders held by an in-process repository behind a trait boundary
//! - Bearer-token identity resolution seeded from configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{Router, routing::get};
use sentry::integrations::tracing as sentry_tracing;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quitanda_server::catalog::{CatalogGateway, InMemoryCatalog};
use quitanda_server::config::ServerConfig;
use quitanda_server::db::{FileKvStore, InMemoryOrderRepository, KvStore, OrderRepository};
use quitanda_server::identity::{IdentityProvider, StaticIdentityProvider};
use quitanda_server::routes;
use quitanda_server::services::CartStore;
use quitanda_server::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Load the catalog, falling back to an empty one when the file is absent.
fn load_catalog(config: &ServerConfig) -> InMemoryCatalog {
    match InMemoryCatalog::from_file(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                path = %config.catalog_path.display(),
                "catalog not loaded ({e}); starting with an empty catalog"
            );
            InMemoryCatalog::new(Vec::new())
        }
    }
}

/// Build the identity provider from the configured admin seed.
fn build_identity(config: &ServerConfig) -> StaticIdentityProvider {
    let provider = StaticIdentityProvider::new();
    match &config.admin_seed {
        Some(seed) => {
            tracing::info!(email = %seed.email, "admin identity seeded");
            provider.with_admin(seed.token.clone(), seed.email.clone(), seed.name.clone())
        }
        None => provider,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quitanda_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Assemble the collaborator boundaries
    let kv: Arc<dyn KvStore> = Arc::new(FileKvStore::new(config.data_dir.clone()));
    let catalog: Arc<dyn CatalogGateway> = Arc::new(load_catalog(&config));
    let identity: Arc<dyn IdentityProvider> = Arc::new(build_identity(&config));
    let orders: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
    let cart = CartStore::new(kv);

    let state = AppState::new(config.clone(), catalog, identity, orders, cart);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("quitanda listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
