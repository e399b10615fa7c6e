//! `OpenRouter` against a fake provider served by the crate's own router.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::*;
use crate::{Request, Response, Router, Server, Status};

/// Headers and body the fake provider received.
#[derive(Default)]
struct Seen {
    authorization: Option<String>,
    referer: Option<String>,
    title: Option<String>,
    body: Option<Value>,
}

struct FakeProvider {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), crate::Error>>,
}

impl FakeProvider {
    fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.task.await.unwrap().unwrap();
    }
}

/// Serves `POST /v1/chat/completions` with a fixed status and body.
async fn fake_provider(status: Status, reply: &'static str) -> (FakeProvider, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let recorder = Arc::clone(&seen);

    let router = Router::new().post("/v1/chat/completions", move |req: Request| {
        let recorder = Arc::clone(&recorder);
        async move {
            let mut seen = recorder.lock().unwrap();
            seen.authorization = req.header("authorization").map(str::to_owned);
            seen.referer = req.header("http-referer").map(str::to_owned);
            seen.title = req.header("x-title").map(str::to_owned);
            seen.body = req.json().ok();
            Response::builder().status(status).json(reply.as_bytes().to_vec())
        }
    });

    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr();
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(server.serve_with_shutdown(router, async {
        let _ = stopped.await;
    }));

    (FakeProvider { addr, stop, task }, seen)
}

fn client(fake: &FakeProvider) -> OpenRouter {
    OpenRouter::new("sk-or-test").with_base_url(fake.base_url())
}

fn prompt() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are a helpful summarizer."),
        ChatMessage::user("Summarize this: hello"),
    ]
}

#[tokio::test]
async fn sends_openai_compatible_request() {
    let reply = r#"{"id":"gen-1","choices":[{"index":0,"message":{"role":"assistant","content":" Hi. "}}]}"#;
    let (fake, seen) = fake_provider(Status::Ok, reply).await;

    let completion = client(&fake)
        .with_attribution(Some("http://localhost:5173".into()), Some("precis".into()))
        .create("openai/gpt-3.5-turbo", &prompt())
        .await
        .unwrap();

    assert_eq!(completion.first_content().unwrap(), " Hi. ");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer sk-or-test"));
    assert_eq!(seen.referer.as_deref(), Some("http://localhost:5173"));
    assert_eq!(seen.title.as_deref(), Some("precis"));
    assert_eq!(
        seen.body.clone().unwrap(),
        json!({
            "model": "openai/gpt-3.5-turbo",
            "messages": [
                { "role": "system", "content": "You are a helpful summarizer." },
                { "role": "user", "content": "Summarize this: hello" },
            ],
        })
    );
    drop(seen);

    fake.shutdown().await;
}

#[tokio::test]
async fn unauthorized_is_auth_error_with_provider_message() {
    let reply = r#"{"error":{"message":"No auth credentials found","code":401}}"#;
    let (fake, _) = fake_provider(Status::Unauthorized, reply).await;

    let err = client(&fake).create("m", &prompt()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Auth(_)));
    assert!(err.to_string().contains("No auth credentials found"));

    fake.shutdown().await;
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let (fake, _) = fake_provider(Status::TooManyRequests, r#"{"error":{"message":"slow down"}}"#).await;

    let err = client(&fake).create("m", &prompt()).await.unwrap_err();
    assert_eq!(err.kind(), "rate_limited");

    fake.shutdown().await;
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let (fake, _) = fake_provider(Status::ServiceUnavailable, "upstream overloaded").await;

    let err = client(&fake).create("m", &prompt()).await.unwrap_err();

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    fake.shutdown().await;
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let (fake, _) = fake_provider(Status::Ok, r#"{"choices": "nope"}"#).await;

    let err = client(&fake).create("m", &prompt()).await.unwrap_err();
    assert_eq!(err.kind(), "invalid_response");

    fake.shutdown().await;
}

#[tokio::test]
async fn unreachable_provider_is_unavailable() {
    // Bind and immediately release a port so nothing is listening on it.
    let (fake, _) = fake_provider(Status::Ok, "{}").await;
    let base = fake.base_url();
    fake.shutdown().await;

    let err = OpenRouter::new("k").with_base_url(base).create("m", &prompt()).await.unwrap_err();
    assert_eq!(err.kind(), "unavailable");
}
