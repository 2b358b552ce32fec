use async_trait::async_trait;
use std::sync::Arc;

use super::error::FetchError;

/// Whether the query string is part of a cached request's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Versioned data resources: `?v=` selects a different entry.
    #[default]
    Sensitive,
    /// Static assets: the query string is ignored.
    Ignore,
}

/// A GET request for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub url: String,
    /// Skip any cached copy and go to the network.
    pub force_revalidate: bool,
    /// Never write the response to an offline cache.
    pub no_store: bool,
    pub query_mode: QueryMode,
}

impl ResourceRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            force_revalidate: false,
            no_store: false,
            query_mode: QueryMode::Sensitive,
        }
    }

    /// Appends `key=value` to the query string.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url = format!("{}{}{}={}", self.url, separator, key, value);
        self
    }

    pub fn revalidate(mut self) -> Self {
        self.force_revalidate = true;
        self
    }

    /// For one-off URLs (a per-invocation cache buster) that would never be
    /// looked up again.
    pub fn no_store(mut self) -> Self {
        self.no_store = true;
        self
    }

    pub fn ignoring_query(mut self) -> Self {
        self.query_mode = QueryMode::Ignore;
        self
    }

    /// Identity used by the offline cache.
    pub fn cache_key(&self) -> String {
        let url = self.url.split('#').next().unwrap_or(&self.url);
        let url = match self.query_mode {
            QueryMode::Sensitive => url,
            QueryMode::Ignore => url.split('?').next().unwrap_or(url),
        };
        format!("GET {}", url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs GET requests.
///
/// `Err` means the resource could not be reached at all; an HTTP error status
/// is still an `Ok(Response)` so callers can decide what to do with it.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn get(&self, request: &ResourceRequest) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: ResourceClient + ?Sized> ResourceClient for Arc<T> {
    async fn get(&self, request: &ResourceRequest) -> Result<Response, FetchError> {
        (**self).get(request).await
    }
}

/// Network client backed by reqwest. No request timeout is set; a hung
/// fetch only stalls the sync that issued it.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jusmile/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::network("", format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceClient for ReqwestClient {
    async fn get(&self, request: &ResourceRequest) -> Result<Response, FetchError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|_| FetchError::InvalidUrl(request.url.clone()))?;

        let mut builder = self.client.get(url);
        if request.force_revalidate {
            builder = builder.header(reqwest::header::CACHE_CONTROL, "no-store");
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::network(&request.url, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(&request.url, e))?;

        Ok(Response {
            status,
            body: body.to_vec(),
        })
    }
}
