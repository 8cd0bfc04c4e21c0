use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Candidate, MovieRecord, Review},
};

/// Exact-title lookup of the primary movie facts
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<MovieRecord>;
}

/// Fuzzy title search plus per-movie reviews
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    async fn search(&self, title: &str) -> Result<Vec<Candidate>>;
    async fn reviews(&self, movie_id: i64) -> Result<Vec<Review>>;
}
