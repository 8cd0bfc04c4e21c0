pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod selection;

// Re-export commonly used types
pub use aggregator::{MAX_COMMENTS, MovieAggregator, NO_REVIEWS_SENTINEL};
pub use client::{OmdbClient, TmdbClient, build_http_client};
pub use config::Config;
pub use error::{AggregatorError, Provider, Result};
pub use models::{Candidate, MovieRecord, Review};
pub use provider::{MetadataProvider, ReviewProvider};
pub use selection::{DEFAULT_RELEASE_YEAR_PREFIX, SelectionPolicy};
