mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Reply, StubProvider, TestServer};
use precis::{Summarizer, app};

async fn start() -> TestServer {
    let summarizer = Summarizer::new(StubProvider::new(Reply::Text("short")));
    TestServer::start(app::router(Arc::new(summarizer))).await
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = start().await;
    let client = reqwest::Client::new();

    let live = client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(live.status(), 200);
    assert_eq!(live.text().await.unwrap(), "ok");

    let ready = client.get(server.url("/readyz")).send().await.unwrap();
    assert_eq!(ready.status(), 200);
    assert_eq!(ready.text().await.unwrap(), "ready");

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_endpoints_answer_head() {
    let server = start().await;
    let client = reqwest::Client::new();

    for path in ["/healthz", "/readyz"] {
        let res = client.head(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 200, "HEAD {path}");
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert!(res.text().await.unwrap().is_empty());
    }

    let res = client.put(server.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["allow"], "GET, HEAD");

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let server = start().await;

    let res = reqwest::get(server.url("/nope")).await.unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_method_is_405_with_allow() {
    let server = start().await;

    let res = reqwest::get(server.url("/summarize")).await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["allow"], "POST");

    server.shutdown().await;
}

#[tokio::test]
async fn test_every_response_allows_any_origin() {
    let server = start().await;
    let client = reqwest::Client::new();

    let ok = client
        .post(server.url("/summarize"))
        .header("origin", "http://localhost:5173")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);
    assert_eq!(ok.headers()["access-control-allow-origin"], "*");

    let missing = client.get(server.url("/missing")).send().await.unwrap();
    assert_eq!(missing.headers()["access-control-allow-origin"], "*");

    server.shutdown().await;
}

#[tokio::test]
async fn test_preflight_is_answered_without_routing() {
    let server = start().await;

    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.url("/summarize"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 204);
    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "content-type");
    assert!(headers["access-control-allow-methods"].to_str().unwrap().contains("POST"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_closes_idle_keep_alive_connections() {
    let server = start().await;
    let client = reqwest::Client::new();

    // Leaves a pooled keep-alive connection open.
    let res = client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    tokio::time::timeout(Duration::from_secs(5), server.shutdown())
        .await
        .expect("shutdown should not wait on idle connections");
}
