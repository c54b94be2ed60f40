//! Canned-response transport for tests and local development.

use async_trait::async_trait;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::TransportError;
use crate::Transport;

/// A request the mock saw, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
}

/// Transport double. Replies are served from a queue; with the queue
/// empty it fabricates a minimal success response with a random order id,
/// so simple callers work without any setup.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response body for the next request.
    pub fn push_reply(&self, body: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(body.into()));
    }

    /// Queue a transport failure for the next request.
    pub fn push_failure(&self, err: TransportError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn respond(&self, url: &str, body: &str) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body: body.to_string(),
        });
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        let order_id: u32 = rand::thread_rng().gen_range(1..=99_999);
        Ok(format!(
            "<PostAPIResponse><SaveTransactionalOrderResult><OrderID>{order_id}</OrderID>\
             </SaveTransactionalOrderResult></PostAPIResponse>"
        ))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn upload(&self, url: &str, body: &str) -> Result<String, TransportError> {
        self.respond(url, body)
    }

    async fn download(&self, url: &str) -> Result<String, TransportError> {
        self.respond(url, "")
    }
}
