//! Preview server for docview documentation bundles.
//!
//! Serves a bundle directory the way static hosting would, plus a small JSON
//! API backed by the same [`Site`] the headless viewer uses:
//!
//! - `GET /api/navigation?lang=ko`: sidebar tree
//! - `GET /api/pages/{lang}/{*slug}`: rendered document
//! - `GET /api/search?q=install`: top search matches
//! - anything else: files from the bundle, with `index.html` served for
//!   extensionless paths so path-routed URLs load the viewer
//!
//! # Quick Start
//!
//! ```ignore
//! use docview_config::{CliSettings, Config};
//! use docview_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     let server = ServerConfig::from_config(&config).unwrap();
//!     run_server(server).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use docview_config::{Config, RoutingMode};
use docview_navigation::{LanguageSet, codec_for};
use docview_site::{Site, SiteOptions};
use docview_storage::{FsStorage, Storage};

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Bundle directory served as the site root.
    pub bundle_dir: PathBuf,
    /// URL prefix the bundle is also mounted under (`docs-platform`).
    pub base_prefix: String,
    /// Routing mode used for sidebar links.
    pub routing: RoutingMode,
    /// Supported languages.
    pub languages: LanguageSet,
    /// Bundle layout.
    pub site: SiteOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7980,
            bundle_dir: PathBuf::from("."),
            base_prefix: "docs-platform".to_owned(),
            routing: RoutingMode::Path,
            languages: LanguageSet::default(),
            site: SiteOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Server configuration from a loaded docview configuration.
    ///
    /// The routing mode is resolved against the bind host, so `auto` serves
    /// hash links locally.
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        let routing = config.routing.resolve(&config.server.host);
        Ok(Self {
            host: config.server.host.clone(),
            port: config.server.port,
            bundle_dir: config.paths_resolved.bundle_dir.clone(),
            base_prefix: config.site.normalized_prefix().to_owned(),
            routing,
            languages: LanguageSet::from(&config.languages),
            site: SiteOptions::from_config(config, routing)
                .map_err(|e| ServerError::Config(e.to_string()))?,
        })
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or cannot be bound.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.bundle_dir.clone()));
    let site = Arc::new(Site::load(storage, config.site.clone()));

    let state = Arc::new(AppState {
        site,
        languages: config.languages.clone(),
        codec: codec_for(config.routing, &config.base_prefix),
        bundle_dir: config.bundle_dir.clone(),
    });
    let app = app::create_router(state, &config.base_prefix);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))
        .map_err(|e| ServerError::Config(format!("invalid address: {e}")))?;
    tracing::info!(
        address = %addr,
        bundle = %config.bundle_dir.display(),
        mode = %config.routing,
        "Starting preview server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
