//! Lifecycle of a registry double: construction, binding and shutdown.

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use url::Url;

use crate::api::{self, AppState};
use crate::config::{DoubleConfig, UnmatchedRoutes};
use crate::error::{DoubleError, Result};
use crate::health::HealthChecker;
use crate::registration::Registration;
use crate::store::ServiceStore;

/// An in-memory stand-in for the registry service.
///
/// Every double owns its own store, so independent doubles can run side by
/// side in one test process. Clones share the store.
#[derive(Debug, Clone)]
pub struct RegistryDouble {
    state: AppState,
    bind_addr: SocketAddr,
}

impl Default for RegistryDouble {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryDouble {
    /// A double with an empty store and the default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RegistryDoubleBuilder {
        RegistryDoubleBuilder::new()
    }

    pub fn from_config(config: DoubleConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// The request handler, usable without binding a listener.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(api::dispatch)
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind a listener and serve requests on a background task.
    pub async fn start(&self) -> Result<RunningDouble> {
        let listener = TcpListener::bind(self.bind_addr)
            .await
            .map_err(|source| DoubleError::Bind {
                addr: self.bind_addr,
                source,
            })?;
        let local_addr = listener.local_addr()?;
        let url = base_url(local_addr)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = self.router();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        info!("Registry double listening on {}", url);

        Ok(RunningDouble {
            url,
            local_addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Stored record for `service_id`, if any.
    pub async fn registration(&self, service_id: &str) -> Option<Registration> {
        self.state.store.lock().await.get(service_id).cloned()
    }

    /// Snapshot of every stored record, in no particular order.
    pub async fn registrations(&self) -> Vec<Registration> {
        self.state.store.lock().await.snapshot()
    }

    pub async fn len(&self) -> usize {
        self.state.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.store.lock().await.is_empty()
    }
}

fn base_url(addr: SocketAddr) -> Result<Url> {
    let raw = format!("http://{}", addr);
    Url::parse(&raw).map_err(|source| DoubleError::InvalidConfig(format!("base url {:?}: {}", raw, source)))
}

/// A double serving on a bound listener.
///
/// Dropping it signals the server to shut down without waiting for it.
#[derive(Debug)]
pub struct RunningDouble {
    url: Url,
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl RunningDouble {
    /// Base URL clients should target, e.g. `http://127.0.0.1:41234/`.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn stop(mut self) -> Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await? {
                error!("Registry double at {} stopped with error: {}", self.url, e);
                return Err(e.into());
            }
        }

        info!("Registry double at {} stopped", self.url);
        Ok(())
    }
}

impl Drop for RunningDouble {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

#[derive(Debug, Default)]
pub struct RegistryDoubleBuilder {
    config: DoubleConfig,
    client: Option<reqwest::Client>,
}

impl RegistryDoubleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: DoubleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    pub fn body_limit(mut self, limit: usize) -> Self {
        self.config.body_limit = limit;
        self
    }

    pub fn unmatched_routes(mut self, policy: UnmatchedRoutes) -> Self {
        self.config.unmatched_routes = policy;
        self
    }

    /// HTTP client used for health checks.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> RegistryDouble {
        RegistryDouble {
            state: AppState {
                store: ServiceStore::shared(),
                health: HealthChecker::new(self.client.unwrap_or_default()),
                body_limit: self.config.body_limit,
                unmatched_routes: self.config.unmatched_routes,
            },
            bind_addr: self.config.bind_addr,
        }
    }
}
