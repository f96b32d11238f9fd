//! In-memory transport for client unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::ArenaClient;
use crate::config::ClientConfig;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

pub(crate) const TOKEN: &str = "MY_API_TOKEN";

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, String> + Send + Sync>;

/// Records every request and answers from a responder function.
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    respond: Responder,
}

impl RecordingTransport {
    pub(crate) fn with<F>(respond: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, String> + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    pub(crate) fn replying(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::with(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    pub(crate) fn failing(message: &'static str) -> Self {
        Self::with(move |_| Err(message.to_string()))
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = (self.respond)(&request);
        self.requests.lock().unwrap().push(request);
        response.map_err(TransportError::from)
    }
}

pub(crate) type TestClient<'a> = ArenaClient<&'a RecordingTransport, fn() -> i64>;

fn fixed_now() -> i64 {
    12345
}

/// Authenticated client on the public API root with a clock fixed at 12345.
pub(crate) fn client(transport: &RecordingTransport) -> TestClient<'_> {
    let config = ClientConfig::default().with_token(TOKEN);
    ArenaClient::with_config(config, transport).with_clock(fixed_now as fn() -> i64)
}
