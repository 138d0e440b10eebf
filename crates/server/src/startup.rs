use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StorageBackend};
use service::{runtime, storage::Database};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

/// Open the configured collections and assemble the shared request state.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = match cfg.storage.backend {
        StorageBackend::File => {
            runtime::ensure_env(&cfg.storage.data_dir).await?;
            Database::open(&cfg.storage.data_dir).await?
        }
        StorageBackend::Memory => {
            info!("using in-memory collections; data is lost on exit");
            Database::in_memory()
        }
    };
    ServerState::new(&cfg.auth, db)
}

/// Router with CORS from `cfg`, ready to serve.
pub fn build_app(cfg: &AppConfig, state: ServerState) -> Result<Router, StartupError> {
    let cors = routes::build_cors(&cfg.cors)?;
    Ok(routes::build_router(state, cors))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl_c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app from `cfg` and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(&cfg, state)?;

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, "starting career maker server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
