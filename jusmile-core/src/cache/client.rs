use async_trait::async_trait;
use std::sync::Arc;

use super::offline::OfflineCache;
use crate::fetch::{FetchError, ResourceClient, ResourceRequest, Response};

/// Cache-first client over a single cache generation.
///
/// Requests are answered from the generation when possible. Misses and
/// forced revalidations go to `inner`; successful (200) responses are stored
/// back unless the request is marked `no_store`. When the network is unreachable and nothing is cached the request
/// fails with [`FetchError::Offline`].
pub struct OfflineClient<C> {
    inner: C,
    cache: Arc<OfflineCache>,
    generation: String,
}

impl<C: ResourceClient> OfflineClient<C> {
    pub fn new(inner: C, cache: Arc<OfflineCache>, generation: impl Into<String>) -> Self {
        Self {
            inner,
            cache,
            generation: generation.into(),
        }
    }

    /// Client over whichever generation is currently active.
    pub fn active(inner: C, cache: Arc<OfflineCache>) -> Self {
        let generation = cache.active_generation();
        Self::new(inner, cache, generation)
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Fetches each request into the generation. Any entry that cannot be
    /// fetched with a 200 fails the whole precache. Returns how many were stored.
    pub async fn precache(&self, requests: &[ResourceRequest]) -> Result<usize, FetchError> {
        let mut stored = 0;
        for request in requests {
            let response = self.inner.get(&request.clone().revalidate()).await?;
            if response.status != 200 {
                return Err(FetchError::Status {
                    url: request.url.clone(),
                    status: response.status,
                });
            }
            if self.put(request, &response.body) {
                stored += 1;
            }
        }
        tracing::debug!(generation = %self.generation, stored, "Precached resources");
        Ok(stored)
    }

    fn put(&self, request: &ResourceRequest, body: &[u8]) -> bool {
        match self.cache.store(&self.generation, &request.cache_key(), body) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "Failed to store cached response");
                false
            }
        }
    }
}

#[async_trait]
impl<C: ResourceClient> ResourceClient for OfflineClient<C> {
    async fn get(&self, request: &ResourceRequest) -> Result<Response, FetchError> {
        let key = request.cache_key();
        if !request.force_revalidate {
            if let Some(body) = self.cache.lookup(&self.generation, &key) {
                tracing::trace!(url = %request.url, "Served from offline cache");
                return Ok(Response::ok(body));
            }
        }

        match self.inner.get(request).await {
            Ok(response) => {
                if response.status == 200 && !request.no_store {
                    self.put(request, &response.body);
                }
                Ok(response)
            }
            Err(FetchError::Network { url, .. }) => Err(FetchError::Offline { url }),
            Err(e) => Err(e),
        }
    }
}
