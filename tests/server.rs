//! End-to-end tests through a live listener.

use axum::body::Body;
use axum::http::Request;
use path_mux::http::middleware::request_id;
use path_mux::routing::{RequestParamsExt, Router};

mod common;

fn router() -> Router {
    let mut router = Router::new();
    router.use_middleware(request_id());
    router
        .get("/users/:id|[0-9]+", |req: Request<Body>| async move {
            format!("user {}", req.param("id"))
        })
        .unwrap();
    router
        .post("/users", |_req: Request<Body>| async { "created" })
        .unwrap();
    router
}

#[tokio::test]
async fn test_live_dispatch() {
    let (addr, shutdown) = common::start_server(router()).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{addr}/users/42"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "user 42");

    let res = client
        .delete(format!("http://{addr}/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["allow"], "POST,OPTIONS");

    let res = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/users/7"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);
    assert_eq!(res.headers()["allow"], "GET,OPTIONS");

    let res = client
        .get(format!("http://{addr}/users/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let (addr, shutdown) = common::start_server(router()).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let res = client
                .get(format!("http://{addr}/users/{i}"))
                .send()
                .await
                .unwrap();
            res.text().await.unwrap()
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), format!("user {i}"));
    }

    shutdown.trigger();
}
