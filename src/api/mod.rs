//! REST server
//!
//! An axum application exposing `/api/auth`, `/api/v1/*` and
//! `/api/activities` over the storage layer. Handlers authenticate with a
//! bearer token, hand the work to a service on the blocking pool and answer
//! JSON or a problem body.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, Problem};
pub use extract::AuthUser;
pub use state::{AppState, SharedState};

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware, Router,
};
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::{FinancePaths, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::storage::Storage;

/// How often expired sessions are swept
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Build the application router around a prepared state
pub fn router(state: SharedState) -> Router {
    let cors = cors_layer(&state.settings.server.cors_origins);

    routes::routes()
        .fallback(error::route_not_found)
        .layer(middleware::from_fn(error::fill_problem_path))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60))
}

/// Load storage and serve until Ctrl+C or SIGTERM
pub async fn serve(paths: FinancePaths, settings: Settings) -> FinanceResult<()> {
    settings.validate()?;
    info!(data_dir = %paths.base_dir().display(), "Initializing state...");
    let storage = tokio::task::spawn_blocking(move || Storage::open(paths))
        .await
        .map_err(|e| FinanceError::Storage(format!("Failed to load storage: {}", e)))??;

    let address = settings.server.socket_address();
    let state = AppState::new(storage, settings);
    spawn_session_purge(state.clone());

    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| FinanceError::Io(format!("Failed to bind {}: {}", address, e)))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FinanceError::Io(format!("Server error: {}", e)))?;

    info!("Server shut down");
    Ok(())
}

fn spawn_session_purge(state: SharedState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match state.sessions.purge_expired() {
                Ok(0) => {}
                Ok(purged) => debug!(purged, "expired sessions purged"),
                Err(e) => warn!(error = %e, "session purge failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
