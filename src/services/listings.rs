use crate::models::Listing;
use reqwest::Client;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Dataset shipped with the binary
const EMBEDDED_DATASET: &str = include_str!("../../data/listings.json");

/// Errors that can occur while loading the listing collection
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Failed to read listings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid listing data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Duplicate listing id: {0}")]
    DuplicateId(u32),
}

/// Where the listing collection is read from
#[derive(Debug, Clone)]
pub enum ListingSource {
    /// Dataset compiled into the binary
    Embedded,
    /// JSON array on the local filesystem
    File(PathBuf),
    /// HTTP endpoint returning a JSON array
    Remote { url: String, client: Client },
}

impl ListingSource {
    /// Remote source with a request timeout
    pub fn remote(url: impl Into<String>, timeout: Duration) -> Result<Self, ListingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(ListingSource::Remote {
            url: url.into(),
            client,
        })
    }

    /// Short description for log lines
    pub fn describe(&self) -> String {
        match self {
            ListingSource::Embedded => "embedded".to_string(),
            ListingSource::File(path) => format!("file:{}", path.display()),
            ListingSource::Remote { url, .. } => url.clone(),
        }
    }

    /// Read and validate the full collection
    pub async fn fetch_all(&self) -> Result<Vec<Listing>, ListingError> {
        let listings: Vec<Listing> = match self {
            ListingSource::Embedded => serde_json::from_str(EMBEDDED_DATASET)?,
            ListingSource::File(path) => {
                let contents = tokio::fs::read_to_string(path).await?;
                serde_json::from_str(&contents)?
            }
            ListingSource::Remote { url, client } => {
                client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?
            }
        };

        ensure_unique_ids(&listings)?;
        Ok(listings)
    }
}

fn ensure_unique_ids(listings: &[Listing]) -> Result<(), ListingError> {
    let mut seen = HashSet::with_capacity(listings.len());
    for listing in listings {
        if !seen.insert(listing.id) {
            return Err(ListingError::DuplicateId(listing.id));
        }
    }
    Ok(())
}

/// Read-only access to the listing collection
///
/// A successful load is kept in a moka cache for `ttl`. Failures are not
/// cached, so the next call tries the source again. Errors are shared
/// between the callers that waited on the same load, hence the `Arc`.
pub struct ListingRepository {
    source: ListingSource,
    cache: moka::future::Cache<(), Arc<Vec<Listing>>>,
}

impl ListingRepository {
    pub fn new(source: ListingSource, ttl: Duration) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();

        Self { source, cache }
    }

    pub fn source(&self) -> &ListingSource {
        &self.source
    }

    /// The whole collection, in dataset order
    ///
    /// Concurrent callers on a cold cache share a single load.
    pub async fn get_all(&self) -> Result<Arc<Vec<Listing>>, Arc<ListingError>> {
        self.cache
            .try_get_with((), async {
                match self.source.fetch_all().await {
                    Ok(listings) => {
                        tracing::info!(
                            source = %self.source.describe(),
                            count = listings.len(),
                            "listings loaded"
                        );
                        Ok(Arc::new(listings))
                    }
                    Err(e) => {
                        tracing::error!(source = %self.source.describe(), error = %e, "failed to load listings");
                        Err(e)
                    }
                }
            })
            .await
    }

    /// A single listing. `Ok(None)` means no listing has that id.
    pub async fn get_by_id(&self, id: u32) -> Result<Option<Listing>, Arc<ListingError>> {
        let listings = self.get_all().await?;
        Ok(listings.iter().find(|l| l.id == id).cloned())
    }

    /// Drop the cached collection and load it again
    pub async fn reload(&self) -> Result<Arc<Vec<Listing>>, Arc<ListingError>> {
        self.cache.invalidate(&()).await;
        self.get_all().await
    }

    /// Number of cached listings, without triggering a load
    pub async fn cached_count(&self) -> Option<usize> {
        self.cache.get(&()).await.map(|listings| listings.len())
    }
}
