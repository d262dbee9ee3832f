//! In-memory circle reference data.
//!
//! Both directories are fetched once at startup and are read-only afterwards,
//! so request handlers share them through an `Arc` without any locking.

use crate::errors::FetchError;
use crate::models::{CircleFeed, CircleRecord, PostpaidCircle, PrepaidCircle};
use crate::portal_client::PortalClient;
use serde::de::DeserializeOwned;

pub type PrepaidDirectory = CircleDirectory<PrepaidCircle>;
pub type PostpaidDirectory = CircleDirectory<PostpaidCircle>;

/// Ordered list of circle records from one feed.
#[derive(Debug, Clone)]
pub struct CircleDirectory<T> {
    records: Vec<T>,
}

impl<T> Default for CircleDirectory<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> CircleDirectory<T>
where
    T: CircleRecord + DeserializeOwned,
{
    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Fetches `feed_url` and decodes it into a directory.
    ///
    /// Unknown fields are ignored and missing ones take their zero value.
    pub async fn load(client: &PortalClient, feed_url: &str) -> Result<Self, FetchError> {
        let body = client.fetch_feed(feed_url).await?;
        let directory = Self::from_feed_bytes(&body)?;
        tracing::info!(
            "Loaded {} circle records from {}",
            directory.len(),
            feed_url
        );
        Ok(directory)
    }

    pub fn from_feed_bytes(body: &[u8]) -> Result<Self, FetchError> {
        let feed: CircleFeed<T> = serde_json::from_slice(body)?;
        Ok(Self::from_records(feed.rowset.rows))
    }

    /// Finds the record whose circle code or display name equals `query`,
    /// ignoring case.
    ///
    /// The feed may list the same code more than once; the last match wins.
    pub fn resolve(&self, query: &str) -> Option<&T> {
        if query.is_empty() {
            return None;
        }
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.circle_code().to_lowercase() == query
                    || record.circle_name().to_lowercase() == query
            })
            .last()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
