//! Scripted transport shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

pub const BASE_URL: &str = "http://api.test";

type Route = (HttpMethod, String);

/// Answers requests from a per-route script and records every request.
///
/// Gated replies are consumed first, in order; they stay pending until the
/// test sends on the returned channel. Otherwise the route's standing reply
/// is used, and unknown routes get a 404.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<HashMap<Route, Result<HttpResponse, String>>>,
    gates: RefCell<HashMap<Route, VecDeque<oneshot::Receiver<HttpResponse>>>>,
    calls: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .insert(route(method, path), Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, method: HttpMethod, path: &str, reason: &str) {
        self.replies
            .borrow_mut()
            .insert(route(method, path), Err(reason.to_string()));
    }

    pub fn gate(&self, method: HttpMethod, path: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .borrow_mut()
            .entry(route(method, path))
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        let (method, url) = route(method, path);
        self.calls
            .borrow()
            .iter()
            .filter(|req| req.method == method && req.path == url)
            .count()
    }
}

fn route(method: HttpMethod, path: &str) -> Route {
    (method, format!("{BASE_URL}{path}"))
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let key = (request.method, request.path.clone());
        self.calls.borrow_mut().push(request);

        let gate = self
            .gates
            .borrow_mut()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            return gate
                .await
                .map_err(|_| ApiError::Transport("gate dropped".to_string()));
        }

        match self.replies.borrow().get(&key) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(reason)) => Err(ApiError::Transport(reason.clone())),
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}
