/// Failure reaching a resource.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Nothing cached for the request and the network is unreachable.
    #[error("Offline and no cached copy of {url}")]
    Offline { url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    pub fn network(url: impl Into<String>, message: impl ToString) -> Self {
        FetchError::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Offline { url } => url.as_str(),
            FetchError::InvalidUrl(url) => url.as_str(),
        }
    }
}
