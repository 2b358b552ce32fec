use super::client::{ResourceClient, ResourceRequest};
use super::error::FetchError;
use crate::tabular::{self, Row};

/// Fetches a delimited-text resource and parses it into rows. Each call goes
/// back to the client; caching is the client's concern.
pub struct TableFetcher<C> {
    client: C,
}

impl<C: ResourceClient> TableFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn fetch_text(&self, request: &ResourceRequest) -> Result<String, FetchError> {
        let response = self.client.get(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: request.url.clone(),
                status: response.status,
            });
        }
        Ok(response.text())
    }

    pub async fn fetch_table(&self, request: &ResourceRequest) -> Result<Vec<Row>, FetchError> {
        let text = self.fetch_text(request).await?;
        let rows = tabular::parse(&text);
        tracing::debug!(url = %request.url, rows = rows.len(), "Fetched table");
        Ok(rows)
    }
}
