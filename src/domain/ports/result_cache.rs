use crate::domain::entities::ad::Ad;
use crate::domain::error::DomainError;
use crate::domain::values::platform::Platform;
use chrono::{DateTime, Utc};

/// One persisted search result. Entries are append-only: a fresh search
/// writes a new entry and older ones stay behind as history.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheEntry {
    pub platform: Platform,
    pub query: String,
    pub last_updated: DateTime<Utc>,
    pub ads: Vec<Ad>,
}

impl CacheEntry {
    /// Expired once older than `ttl`. An entry exactly at the boundary is
    /// still fresh.
    pub fn is_expired(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.last_updated > ttl
    }
}

/// Metadata row for listing past searches without deserializing payloads.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheEntryInfo {
    pub platform: Platform,
    pub query: String,
    pub last_updated: DateTime<Utc>,
    pub ad_count: usize,
}

pub trait ResultCache: Send + Sync {
    /// Most recently written entry for the key, regardless of age. TTL
    /// checking is the caller's concern.
    fn read(&self, platform: Platform, query: &str) -> Result<Option<CacheEntry>, DomainError>;

    /// Append a new entry for the key. Existing entries are not touched.
    fn write(&self, platform: Platform, query: &str, ads: &[Ad]) -> Result<(), DomainError>;

    /// List entry metadata, newest first, optionally filtered.
    fn history(
        &self,
        platform: Option<Platform>,
        query: Option<&str>,
    ) -> Result<Vec<CacheEntryInfo>, DomainError>;
}
