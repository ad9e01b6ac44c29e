//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use path_mux::config::ServerConfig;
use path_mux::http::HttpServer;
use path_mux::lifecycle::Shutdown;
use path_mux::routing::Router;
use tower::ServiceExt;

/// Send one request through `router` in-process.
pub async fn send(router: &Router, method: &str, path: &str) -> Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(req).await.unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), 64 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Value of the `Allow` header, if any.
pub fn allow(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get("allow")
        .map(|v| v.to_str().unwrap().to_string())
}

/// Start `router` behind a real listener on an ephemeral port.
pub async fn start_server(router: Router) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let server = HttpServer::new(config, router);
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
