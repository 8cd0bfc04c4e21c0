use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{AggregatorError, Provider, Result},
    models::{Candidate, MetadataResponse, MovieRecord, Review, ReviewsResponse, SearchResponse},
    provider::{MetadataProvider, ReviewProvider},
};

/// Shared reqwest client with the per-call timeout applied.
pub fn build_http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| AggregatorError::Config(format!("Failed to build HTTP client: {}", e)))
}

fn redact(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return url.to_string();
    }
    url.replace(&*urlencoding::encode(api_key), "<redacted>")
        .replace(api_key, "<redacted>")
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: Provider,
    url: &str,
    api_key: &str,
) -> Result<T> {
    debug!("GET {} ({})", redact(url, api_key), provider);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| AggregatorError::Request {
            provider,
            source: source.without_url(),
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| AggregatorError::Request {
            provider,
            source: source.without_url(),
        })?;

    if !status.is_success() {
        return Err(AggregatorError::Api {
            provider,
            status_code: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|source| AggregatorError::Decode { provider, source })
}

/// OMDb-style metadata lookup keyed by exact title.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(client, &config.omdb_base_url, &config.omdb_api_key)
    }

    fn lookup_url(&self, title: &str) -> String {
        format!(
            "{}/?t={}&apiKey={}",
            self.base_url,
            urlencoding::encode(title),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<MovieRecord> {
        let url = self.lookup_url(title);
        let response: MetadataResponse =
            get_json(&self.client, Provider::Metadata, &url, &self.api_key).await?;

        if response.is_negative() {
            warn!(
                "Metadata provider has no exact match for '{}': {}",
                title,
                response.error.as_deref().unwrap_or("no details")
            );
        }

        Ok(response.record)
    }
}

/// TMDb-style search and reviews.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(client, &config.tmdb_base_url, &config.tmdb_api_key)
    }

    fn search_url(&self, title: &str) -> String {
        format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(title)
        )
    }

    fn reviews_url(&self, movie_id: i64) -> String {
        format!(
            "{}/movie/{}/reviews?api_key={}",
            self.base_url,
            movie_id,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl ReviewProvider for TmdbClient {
    async fn search(&self, title: &str) -> Result<Vec<Candidate>> {
        let url = self.search_url(title);
        let response: SearchResponse =
            get_json(&self.client, Provider::Search, &url, &self.api_key).await?;
        Ok(response.results)
    }

    async fn reviews(&self, movie_id: i64) -> Result<Vec<Review>> {
        let url = self.reviews_url(movie_id);
        let response: ReviewsResponse =
            get_json(&self.client, Provider::Reviews, &url, &self.api_key).await?;
        Ok(response.results)
    }
}
