//! debox server
//!
//! HTTP front end for the snow-box viewer: serves the two datasets, runs
//! nearest-marker selection for a viewport and proxies keyword search.
//!
//! # Example
//!
//! ```ignore
//! use debox_server::{AppState, run_server};
//!
//! let state = AppState::new(config, loader, store).into_shared();
//! run_server(listener, state, shutdown).await?;
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, SharedState};

use std::future::Future;
use tracing::info;

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn run_server(
    listener: tokio::net::TcpListener,
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!(
        "debox server listening on {} under {}",
        listener.local_addr()?,
        state.base_path()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutdown signal received, server stopped");
    Ok(())
}
