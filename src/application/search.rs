//! The search use case: credit gate, cache-aside lookup, and the ranking
//! pipeline (normalize → classify → benchmark → dedupe → rank).
//!
//! Credits and cache are each a read-modify-write over externally shared
//! state with no transactional guarantee. Concurrent requests can race past
//! the credit check before either debits, and two searches for the same key
//! can both miss and both write an entry. That weak consistency is
//! deliberate and preserved here; tightening it belongs at the persistence
//! boundary (conditional update / insert-if-absent), not in-process locks.

use crate::application::{benchmark, classify, normalize, rank};
use crate::application::rank::SortBy;
use crate::domain::entities::ad::Ad;
use crate::domain::error::DomainError;
use crate::domain::ports::ad_fetcher::AdFetcher;
use crate::domain::ports::credit_ledger::CreditLedger;
use crate::domain::ports::result_cache::ResultCache;
use crate::domain::values::platform::Platform;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Scope of the result-cache key. The narrow default reuses results across
/// countries for the same keyword; widen it if per-country results matter
/// more than cache reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheKeyScope {
    #[default]
    PlatformQuery,
    PlatformQueryCountry,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub cache_ttl: Duration,
    pub key_scope: CacheKeyScope,
    /// One credit buys this many requested ads (minimum charge one credit).
    pub ads_per_credit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::hours(24),
            key_scope: CacheKeyScope::default(),
            ads_per_credit: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub platform: Platform,
    pub country: String,
    pub limit: usize,
    pub sort_by: SortBy,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, platform: Platform) -> Self {
        Self {
            query: query.into(),
            platform,
            country: "US".to_string(),
            limit: 10,
            sort_by: SortBy::default(),
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.query.trim().len() < 2 {
            return Err(DomainError::InvalidInput(
                "query must be at least 2 characters".into(),
            ));
        }
        if self.limit == 0 || self.limit > 100 {
            return Err(DomainError::InvalidInput(
                "limit must be between 1 and 100".into(),
            ));
        }
        if self.country.len() != 2 || !self.country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidInput(
                "country must be a 2-letter uppercase code".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Live,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub source: Source,
    pub count: usize,
    pub ads: Vec<Ad>,
}

pub struct SearchUseCase {
    fetcher: Arc<dyn AdFetcher>,
    cache: Arc<dyn ResultCache>,
    ledger: Arc<dyn CreditLedger>,
    config: SearchConfig,
}

impl SearchUseCase {
    pub fn new(
        fetcher: Arc<dyn AdFetcher>,
        cache: Arc<dyn ResultCache>,
        ledger: Arc<dyn CreditLedger>,
        config: SearchConfig,
    ) -> Self {
        Self {
            fetcher,
            cache,
            ledger,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, DomainError> {
        request.validate()?;

        let cost = self.credit_cost(request.limit);
        if !self.ledger.has_balance(user_id, cost)? {
            return Err(DomainError::InsufficientCredits { required: cost });
        }

        let key = self.cache_key(request);
        if let Some(ads) = self.cached_result(request, &key) {
            self.debit_best_effort(user_id, cost, &request.query);
            let count = ads.len();
            return Ok(SearchResponse {
                source: Source::Cache,
                count,
                ads,
            });
        }

        let raw = self
            .fetcher
            .fetch_batch(&request.query, request.platform, &request.country, request.limit)
            .await
            .map_err(DomainError::Fetch)?;

        let mut ads: Vec<Ad> = Vec::with_capacity(raw.len());
        let mut rejected = 0usize;
        for record in &raw {
            match normalize::normalize(record, request.platform) {
                Some(ad) => ads.push(ad),
                None => rejected += 1,
            }
        }
        debug!(fetched = raw.len(), rejected, query = %request.query, "normalized batch");

        for ad in &mut ads {
            classify::assign(ad);
        }
        benchmark::score_batch(&mut ads);

        let mut ads = rank::rank(rank::dedupe(ads), request.sort_by);
        ads.truncate(request.limit);

        if let Err(e) = self.cache.write(request.platform, &key, &ads) {
            // Best-effort caching: the caller still gets the fresh results.
            warn!(error = %e, query = %request.query, "cache write failed");
        }
        self.debit_best_effort(user_id, cost, &request.query);

        info!(count = ads.len(), query = %request.query, platform = %request.platform, "live search complete");
        let count = ads.len();
        Ok(SearchResponse {
            source: Source::Live,
            count,
            ads,
        })
    }

    fn credit_cost(&self, limit: usize) -> i64 {
        (limit / self.config.ads_per_credit.max(1)).max(1) as i64
    }

    fn cache_key(&self, request: &SearchRequest) -> String {
        match self.config.key_scope {
            CacheKeyScope::PlatformQuery => request.query.to_lowercase(),
            CacheKeyScope::PlatformQueryCountry => {
                format!("{}|{}", request.query.to_lowercase(), request.country)
            }
        }
    }

    /// A fresh cache entry short-circuits the pipeline entirely. Read errors
    /// and expired entries degrade to a miss.
    fn cached_result(&self, request: &SearchRequest, key: &str) -> Option<Vec<Ad>> {
        let entry = match self.cache.read(request.platform, key) {
            Ok(entry) => entry?,
            Err(e) => {
                warn!(error = %e, query = %request.query, "cache read failed, treating as miss");
                return None;
            }
        };
        if entry.is_expired(self.config.cache_ttl, Utc::now()) {
            return None;
        }
        info!(age_minutes = (Utc::now() - entry.last_updated).num_minutes(), query = %request.query, "cache hit");
        // Stored ads keep the scores computed when the entry was written;
        // only the presentation order and count are adjusted per request.
        let mut ads = rank::rank(entry.ads, request.sort_by);
        ads.truncate(request.limit);
        Some(ads)
    }

    fn debit_best_effort(&self, user_id: &str, cost: i64, query: &str) {
        let description = format!("Search: {query}");
        if let Err(e) = self.ledger.debit(user_id, cost, &description) {
            // Not retried; the search result is already owed to the caller.
            warn!(error = %e, user_id, "credit debit failed");
        }
    }
}
