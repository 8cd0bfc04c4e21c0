//! MovieAggregator – fans out one title lookup to the metadata and review
//! providers and merges the answers into a single [`MovieRecord`].
//!
//! Two branches run concurrently inside the calling task:
//! * **metadata**: exact-title lookup of the primary facts
//! * **reviews**: candidate search, then candidate selection, then the reviews
//!   of the selected candidate
//!
//! Each branch returns an owned value and the caller merges them once both
//! finished. If either branch fails the other is dropped and the error is
//! returned; a partial record never escapes.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::{
    client::{OmdbClient, TmdbClient, build_http_client},
    config::Config,
    error::{AggregatorError, Result},
    models::MovieRecord,
    provider::{MetadataProvider, ReviewProvider},
    selection::SelectionPolicy,
};

/// Upper bound on review excerpts attached to a record.
pub const MAX_COMMENTS: usize = 3;

/// Single comment used when no review could be attached.
pub const NO_REVIEWS_SENTINEL: &str = "Nenhuma avaliação encontrada";

#[derive(Clone)]
pub struct MovieAggregator {
    metadata: Arc<dyn MetadataProvider>,
    reviews: Arc<dyn ReviewProvider>,
    policy: SelectionPolicy,
}

impl MovieAggregator {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        reviews: Arc<dyn ReviewProvider>,
        policy: SelectionPolicy,
    ) -> Self {
        Self {
            metadata,
            reviews,
            policy,
        }
    }

    /// Wire up the HTTP-backed providers from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(config)?;
        let metadata = Arc::new(OmdbClient::from_config(client.clone(), config));
        let reviews = Arc::new(TmdbClient::from_config(client, config));

        Ok(Self::new(
            metadata,
            reviews,
            SelectionPolicy::new(config.release_year_prefix.clone()),
        ))
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Look up `title` and return the merged record.
    pub async fn fetch(&self, title: &str) -> Result<MovieRecord> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AggregatorError::EmptyTitle);
        }

        let start_time = Instant::now();
        info!("Fetching movie '{}'", title);

        let (mut record, comments) =
            tokio::try_join!(self.metadata.lookup(title), self.fetch_comments(title))?;
        record.comments = comments;

        info!(
            "Fetched movie '{}' with {} comment(s) in {:.2?}",
            title,
            record.comments.len(),
            start_time.elapsed()
        );

        Ok(record)
    }

    /// Search, select a candidate, then pull its first reviews.
    async fn fetch_comments(&self, title: &str) -> Result<Vec<String>> {
        let candidates = self.reviews.search(title).await?;
        debug!("Search returned {} candidate(s) for '{}'", candidates.len(), title);

        let Some(candidate) = self.policy.select(&candidates) else {
            info!("No search candidates for '{}'", title);
            return Ok(vec![NO_REVIEWS_SENTINEL.to_string()]);
        };

        info!(
            "Selected candidate {} '{}' released {}",
            candidate.id, candidate.title, candidate.release_date
        );

        let comments: Vec<String> = self
            .reviews
            .reviews(candidate.id)
            .await?
            .into_iter()
            .take(MAX_COMMENTS)
            .map(|review| review.content)
            .collect();

        if comments.is_empty() {
            info!("Candidate {} has no reviews", candidate.id);
            return Ok(vec![NO_REVIEWS_SENTINEL.to_string()]);
        }

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Provider;
    use crate::models::{Candidate, Review};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StaticMetadata {
        record: Option<MovieRecord>,
        calls: AtomicUsize,
    }

    impl StaticMetadata {
        fn ok(record: MovieRecord) -> Self {
            Self {
                record: Some(record),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                record: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MetadataProvider for StaticMetadata {
        async fn lookup(&self, _title: &str) -> Result<MovieRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Let the other branch make progress first.
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.record.clone().ok_or(AggregatorError::Api {
                provider: Provider::Metadata,
                status_code: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    struct StaticReviews {
        candidates: Vec<Candidate>,
        reviews: Option<Vec<Review>>,
        requested_ids: Mutex<Vec<i64>>,
        searches: AtomicUsize,
    }

    impl StaticReviews {
        fn new(candidates: Vec<Candidate>, reviews: Option<Vec<Review>>) -> Self {
            Self {
                candidates,
                reviews,
                requested_ids: Mutex::new(Vec::new()),
                searches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReviewProvider for StaticReviews {
        async fn search(&self, _title: &str) -> Result<Vec<Candidate>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.clone())
        }

        async fn reviews(&self, movie_id: i64) -> Result<Vec<Review>> {
            self.requested_ids.lock().unwrap().push(movie_id);
            self.reviews.clone().ok_or(AggregatorError::Api {
                provider: Provider::Reviews,
                status_code: 500,
                message: "boom".to_string(),
            })
        }
    }

    fn mars_attacks() -> MovieRecord {
        MovieRecord {
            title: "Mars Attacks!".to_string(),
            year: "1996".to_string(),
            rated: "PG-13".to_string(),
            runtime: "106 min".to_string(),
            rating: "6.4".to_string(),
            comments: Vec::new(),
        }
    }

    fn candidate(id: i64, release_date: &str) -> Candidate {
        Candidate {
            id,
            title: "Mars Attacks!".to_string(),
            release_date: release_date.to_string(),
        }
    }

    fn reviews(n: usize) -> Vec<Review> {
        (1..=n)
            .map(|i| Review {
                content: format!("review {}", i),
            })
            .collect()
    }

    fn aggregator(
        metadata: Arc<StaticMetadata>,
        reviews: Arc<StaticReviews>,
    ) -> MovieAggregator {
        MovieAggregator::new(metadata, reviews, SelectionPolicy::default())
    }

    #[tokio::test]
    async fn test_merges_metadata_with_selected_reviews() {
        let metadata = Arc::new(StaticMetadata::ok(mars_attacks()));
        let provider = Arc::new(StaticReviews::new(
            vec![candidate(10, "1997-01-01"), candidate(75, "1996-12-13")],
            Some(reviews(2)),
        ));

        let record = aggregator(metadata, provider.clone())
            .fetch("Mars Attacks")
            .await
            .unwrap();

        assert_eq!(*provider.requested_ids.lock().unwrap(), vec![75]);
        assert_eq!(record.title, "Mars Attacks!");
        assert_eq!(record.year, "1996");
        assert_eq!(record.rating, "6.4");
        assert_eq!(record.comments, vec!["review 1", "review 2"]);
    }

    #[tokio::test]
    async fn test_comments_capped_in_provider_order() {
        let metadata = Arc::new(StaticMetadata::ok(mars_attacks()));
        let provider = Arc::new(StaticReviews::new(
            vec![candidate(75, "1996-12-13")],
            Some(reviews(5)),
        ));

        let record = aggregator(metadata, provider).fetch("Mars Attacks").await.unwrap();

        assert_eq!(record.comments, vec!["review 1", "review 2", "review 3"]);
    }

    #[tokio::test]
    async fn test_no_candidates_yields_sentinel() {
        let metadata = Arc::new(StaticMetadata::ok(mars_attacks()));
        let provider = Arc::new(StaticReviews::new(Vec::new(), Some(reviews(3))));

        let record = aggregator(metadata, provider.clone())
            .fetch("Mars Attacks")
            .await
            .unwrap();

        assert_eq!(record.comments, vec![NO_REVIEWS_SENTINEL]);
        assert!(provider.requested_ids.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_candidate_without_reviews_yields_sentinel() {
        let metadata = Arc::new(StaticMetadata::ok(mars_attacks()));
        let provider = Arc::new(StaticReviews::new(
            vec![candidate(75, "1996-12-13")],
            Some(Vec::new()),
        ));

        let record = aggregator(metadata, provider).fetch("Mars Attacks").await.unwrap();

        assert_eq!(record.comments, vec![NO_REVIEWS_SENTINEL]);
    }

    #[tokio::test]
    async fn test_metadata_failure_fails_whole_fetch() {
        let metadata = Arc::new(StaticMetadata::failing());
        let provider = Arc::new(StaticReviews::new(
            vec![candidate(75, "1996-12-13")],
            Some(reviews(3)),
        ));

        let err = aggregator(metadata, provider)
            .fetch("Mars Attacks")
            .await
            .unwrap_err();

        assert_eq!(err.provider(), Some(Provider::Metadata));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_reviews_failure_fails_whole_fetch() {
        let metadata = Arc::new(StaticMetadata::ok(mars_attacks()));
        let provider = Arc::new(StaticReviews::new(vec![candidate(75, "1996-12-13")], None));

        let err = aggregator(metadata, provider)
            .fetch("Mars Attacks")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AggregatorError::Api {
                provider: Provider::Reviews,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_title_makes_no_calls() {
        let metadata = Arc::new(StaticMetadata::ok(mars_attacks()));
        let provider = Arc::new(StaticReviews::new(Vec::new(), Some(Vec::new())));

        let err = aggregator(metadata.clone(), provider.clone())
            .fetch("   ")
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(metadata.calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.searches.load(Ordering::SeqCst), 0);
    }
}
