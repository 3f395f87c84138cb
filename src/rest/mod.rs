//! Task REST API server.
//!
//! Axum HTTP server exposing the task CRUD endpoints:
//!   GET    /api/tasks
//!   POST   /api/tasks
//!   GET    /api/tasks/{id}
//!   PUT    /api/tasks/{id}
//!   DELETE /api/tasks/{id}
//!   GET    /api/health

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

/// Bind and serve until Ctrl+C / SIGTERM.
pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    let listener = TcpListener::bind(addr).await?;
    info!("REST API listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    // Allow any origin, method, and header so browser clients can reach the
    // API from a dev server. Development-only setting: restrict origins
    // before exposing the daemon beyond localhost.
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route(
            "/api/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::replace_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(cors)
        .with_state(ctx)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
