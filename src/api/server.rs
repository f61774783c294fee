//! API server setup

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::routes::create_router;
use crate::api::state::AppState;
use crate::error::{Result, SnowmanError};
use crate::store::SnowStore;

/// Build the router and resolve the bind address.
pub fn create_server(store: SnowStore, bind: &str) -> Result<(Router, SocketAddr)> {
    let router = create_router(AppState::new(store)).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| SnowmanError::Config(format!("invalid bind address '{}': {}", bind, e)))?;

    Ok((router, addr))
}

pub async fn run_server(store: SnowStore, bind: &str) -> Result<()> {
    let (router, addr) = create_server(store, bind)?;

    let listener = TcpListener::bind(addr).await?;
    info!("Snowman API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
