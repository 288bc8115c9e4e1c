use crate::domain::values::platform::Platform;

/// One raw, platform-specific record from the scraping provider. No shape is
/// guaranteed: fields may be missing, nested arbitrarily, or error-marked.
pub type RawRecord = serde_json::Value;

/// Batch-fetch collaborator. Retry/backoff and proxy behavior live behind
/// this boundary; the engine issues a single call per cache miss.
#[async_trait::async_trait]
pub trait AdFetcher: Send + Sync {
    /// Fetch up to `limit` raw records for a keyword on one platform.
    /// Order is not guaranteed; duplicates and error-marked records are
    /// expected and handled downstream.
    async fn fetch_batch(
        &self,
        query: &str,
        platform: Platform,
        country: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, String>;
}
