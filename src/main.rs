//! path-mux demo server.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum listener ─▶ trace/timeout ─▶ routing::Router
//!                                                          │
//!                              ┌───────────────────────────┼──────────────────┐
//!                              ▼                           ▼                  ▼
//!                        matched handler          405 / OPTIONS + Allow      404
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use path_mux::config::{load_config, ServerConfig};
use path_mux::http::middleware::{from_fn, request_id};
use path_mux::http::{BoxHandler, HttpServer, RequestIdExt};
use path_mux::lifecycle::{trigger_on_signal, Shutdown};
use path_mux::observability::{logging, metrics};
use path_mux::routing::{RequestParamsExt, RouteError, Router};

#[derive(Parser)]
#[command(name = "path-mux")]
#[command(about = "Demo server for the path-mux request router", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("path-mux v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    // Registration completes before the listener is bound.
    let router = build_router()?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    tokio::spawn(trigger_on_signal(shutdown.clone()));

    let server = HttpServer::new(config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router() -> Result<Router, RouteError> {
    let mut router = Router::new();
    router.use_middleware(request_id());

    router.get("/healthz", |_req: Request<Body>| async {
        Json(json!({ "status": "ok" }))
    })?;
    router.get("/users/:id|[0-9]+", show_user)?;
    router.handle("/users", create_user, &["POST"])?;

    router.group(|files| {
        files.use_middleware(from_fn(|req: Request<Body>, next: BoxHandler| async move {
            let start = Instant::now();
            let path = req.uri().path().to_owned();
            let res = next.call(req).await;
            tracing::info!(
                path = %path,
                status = res.status().as_u16(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "File request served"
            );
            res
        }));
        files.handle("/files/...", show_file, &["GET", "HEAD"])
    })?;

    Ok(router)
}

async fn show_user(req: Request<Body>) -> impl IntoResponse {
    Json(json!({
        "id": req.param("id"),
        "request_id": req.request_id(),
    }))
}

async fn create_user(_req: Request<Body>) -> impl IntoResponse {
    (StatusCode::CREATED, Json(json!({ "created": true })))
}

async fn show_file(req: Request<Body>) -> impl IntoResponse {
    let path = req.params().map(|p| p.wildcard()).unwrap_or_default();
    Json(json!({ "path": path }))
}
