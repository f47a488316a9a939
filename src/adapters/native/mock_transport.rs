use crate::domain::error::NotifyError;
use crate::ports::{HttpRequest, HttpResponse, TransportPort};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Transport answering from a queue of canned outcomes and recording every
/// request it receives. An empty queue behaves like an unreachable server.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, NotifyError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_failure(&self, message: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Err(NotifyError::transport(message)));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TransportPort for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NotifyError> {
        self.requests.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(NotifyError::transport("no response queued")))
    }
}
