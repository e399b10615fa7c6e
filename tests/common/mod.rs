#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use precis::{ChatCompletion, ChatMessage, Completion, ProviderError, Router, Server};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// What the stub answers with.
pub enum Reply {
    Text(&'static str),
    Empty,
    Fail(fn() -> ProviderError),
}

/// A `ChatCompletion` that records every call and returns a canned reply.
pub struct StubProvider {
    reply: Reply,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl StubProvider {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self { reply, calls: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubProvider {
    async fn create(&self, model: &str, messages: &[ChatMessage]) -> Result<Completion, ProviderError> {
        self.calls.lock().unwrap().push((model.to_owned(), messages.to_vec()));
        match &self.reply {
            Reply::Text(text) => Ok(Completion::from_text(*text)),
            Reply::Empty => Ok(Completion::default()),
            Reply::Fail(make) => Err(make()),
        }
    }
}

/// A server running on an ephemeral port. Dropping it without calling
/// [`TestServer::shutdown`] leaves the task to die with the runtime.
pub struct TestServer {
    pub addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), precis::Error>>,
}

impl TestServer {
    pub async fn start(router: Router) -> Self {
        let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = server.local_addr();
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(server.serve_with_shutdown(router, async {
            let _ = stopped.await;
        }));
        Self { addr, stop, task }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        self.task.await.unwrap().unwrap();
    }
}
