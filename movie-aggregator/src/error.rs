use thiserror::Error;

/// Upstream service that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Metadata,
    Search,
    Reviews,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Provider::Metadata => "metadata",
            Provider::Search => "search",
            Provider::Reviews => "reviews",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error("Movie title must not be empty")]
    EmptyTitle,

    #[error("{provider} request failed: {source}")]
    Request {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} provider returned HTTP {status_code}: {message}")]
    Api {
        provider: Provider,
        status_code: u16,
        message: String,
    },

    #[error("Failed to decode {provider} response: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AggregatorError {
    /// True when the caller supplied bad input, as opposed to an upstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AggregatorError::EmptyTitle)
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            AggregatorError::Request { provider, .. }
            | AggregatorError::Api { provider, .. }
            | AggregatorError::Decode { provider, .. } => Some(*provider),
            AggregatorError::EmptyTitle | AggregatorError::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
