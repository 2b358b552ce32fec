//! In-memory `ResourceClient` for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{FetchError, ResourceClient, ResourceRequest, Response};

/// Serves canned responses keyed by URL without its query string. Routes
/// added with [`MockClient::route_exact`] match the full URL and win.
#[derive(Default)]
pub struct MockClient {
    routes: Mutex<HashMap<String, Response>>,
    exact: Mutex<HashMap<String, Response>>,
    offline: AtomicBool,
    delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<ResourceRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, body: &str) {
        self.route_status(url, 200, body);
    }

    pub fn route_status(&self, url: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Response {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
    }

    pub fn route_exact(&self, url: &str, status: u16, body: &str) {
        self.exact.lock().unwrap().insert(
            url.to_string(),
            Response {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
    }

    pub fn unroute(&self, url: &str) {
        self.routes.lock().unwrap().remove(url);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<ResourceRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ResourceClient for MockClient {
    async fn get(&self, request: &ResourceRequest) -> Result<Response, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::network(&request.url, "connection refused"));
        }
        if let Some(response) = self.exact.lock().unwrap().get(&request.url) {
            return Ok(response.clone());
        }
        let path = request.url.split('?').next().unwrap_or(&request.url);
        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or(Response {
                status: 404,
                body: Vec::new(),
            }))
    }
}
