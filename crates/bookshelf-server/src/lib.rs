//! Bookshelf Server - HTTP surface over the bookshelf core
//!
//! Wires the in-memory repositories and the combination service into an
//! axum router and serves it until Ctrl-C.

pub mod config;
pub mod error;
pub mod handler;
pub mod routes;

use std::sync::Arc;

use anyhow::Context;
use bookshelf_core::{new_memory_author_repository, new_memory_book_repository, JoinStrategy};
use tokio::net::TcpListener;

pub use config::ServerConfig;
pub use error::ApiError;
pub use handler::Handler;
pub use routes::build_router;

/// Handler backed by fresh in-memory stores
pub fn build_handler(config: &ServerConfig) -> Handler {
    Handler::new(
        new_memory_book_repository(),
        new_memory_author_repository(),
        Arc::new(config.combination_service()),
    )
}

/// Bind and serve until shutdown is requested
///
/// # Errors
///
/// Fails when the listener cannot be bound or the server stops abnormally.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let app = build_router(Arc::new(build_handler(&config)));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        join_strategy = JoinStrategy::from(config.join_strategy).as_str(),
        fetch_timeout_ms = ?config.fetch_timeout_ms,
        "bookshelf listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("bookshelf stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
