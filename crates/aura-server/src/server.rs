//! Server wiring: shared state, the router, and the listen loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use aura_store::{LookupKind, TrackerStore};

use crate::config::ServerConfig;
use crate::handlers::{episodes, home, lookups, medications, tables};
use crate::health::{HealthResponse, health_check};
use crate::shutdown::ShutdownCoordinator;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Storage facade.
    pub store: Arc<TrackerStore>,
    /// Server start time, for uptime reporting.
    pub start_time: Instant,
}

/// The aura HTTP server.
pub struct AuraServer {
    config: ServerConfig,
    store: Arc<TrackerStore>,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl AuraServer {
    /// Create a server from a config and an opened store.
    pub fn new(config: ServerConfig, store: TrackerStore) -> Self {
        Self {
            config,
            store: Arc::new(store),
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    /// The server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Shutdown coordinator for this server.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Build the full application router.
    pub fn router(&self) -> Router {
        let state = AppState {
            store: self.store.clone(),
            start_time: self.start_time,
        };

        let mut router = Router::new()
            .route("/", get(home::index))
            .route("/login", get(home::login))
            .route("/health", get(health_handler))
            .route("/episodes", get(episodes::list))
            .route("/episodes/new", get(episodes::new_form))
            .route("/episodes/create", post(episodes::create))
            .route("/episodes/{id}", get(episodes::detail))
            .route("/episodes/{id}/edit", get(episodes::edit_form))
            .route("/episodes/{id}/update", post(episodes::update))
            .route("/episodes/{id}/delete", post(episodes::delete))
            .route("/medications", get(medications::list))
            .route("/medications/new", get(medications::new_form))
            .route("/medications/create", post(medications::create))
            .route("/medications/{id}/edit", get(medications::edit_form))
            .route("/medications/{id}/update", post(medications::update))
            .route("/medications/{id}/delete", post(medications::delete))
            .route("/tables", get(tables::index))
            .route("/describe/{table}", get(tables::describe))
            .route("/view/{table}", get(tables::view));

        for kind in LookupKind::ALL {
            router = router.merge(lookups::routes(kind));
        }

        router.layer(TraceLayer::new_for_http()).with_state(state)
    }

    /// Bind and serve. Returns the bound address and the serve task handle.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;

        let app = self.router();
        let token = self.shutdown.token();
        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app)
                .with_graceful_shutdown(async move { token.cancelled().await });
            if let Err(err) = serve.await {
                error!(error = %err, "server error");
            }
        });

        info!(%local_addr, "listening");
        Ok((local_addr, handle))
    }
}

async fn health_handler(State(state): State<AppState>) -> axum::Json<HealthResponse> {
    health_check(state.start_time)
}
