//! Shared test helpers: mock collaborators and raw-record builders.

use adscope::application::search::SearchConfig;
use adscope::domain::entities::ad::Ad;
use adscope::domain::error::DomainError;
use adscope::domain::ports::ad_fetcher::{AdFetcher, RawRecord};
use adscope::domain::ports::credit_ledger::CreditLedger;
use adscope::domain::ports::result_cache::{CacheEntry, CacheEntryInfo, ResultCache};
use adscope::domain::values::category_cluster::CategoryCluster;
use adscope::domain::values::media::Media;
use adscope::domain::values::platform::Platform;
use adscope::domain::values::time_cohort::TimeCohort;
use adscope::AdScope;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Fetcher returning a fixed batch, counting calls.
pub struct StaticFetcher {
    records: Vec<RawRecord>,
    pub calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AdFetcher for StaticFetcher {
    async fn fetch_batch(
        &self,
        _query: &str,
        _platform: Platform,
        _country: &str,
        _limit: usize,
    ) -> Result<Vec<RawRecord>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

pub struct FailingFetcher;

#[async_trait::async_trait]
impl AdFetcher for FailingFetcher {
    async fn fetch_batch(
        &self,
        _query: &str,
        _platform: Platform,
        _country: &str,
        _limit: usize,
    ) -> Result<Vec<RawRecord>, String> {
        Err("actor run timed out".to_string())
    }
}

/// In-memory ledger for use-case level tests.
#[derive(Default)]
pub struct MemoryLedger {
    balances: Mutex<HashMap<String, i64>>,
    pub fail_debits: bool,
}

impl MemoryLedger {
    pub fn with_balance(user: &str, credits: i64) -> Self {
        let ledger = Self::default();
        ledger
            .balances
            .lock()
            .unwrap()
            .insert(user.to_string(), credits);
        ledger
    }

    pub fn failing_debits(user: &str, credits: i64) -> Self {
        let mut ledger = Self::with_balance(user, credits);
        ledger.fail_debits = true;
        ledger
    }
}

impl CreditLedger for MemoryLedger {
    fn has_balance(&self, user_id: &str, amount: i64) -> Result<bool, DomainError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(user_id)
            .is_some_and(|c| *c >= amount))
    }

    fn debit(&self, user_id: &str, amount: i64, _description: &str) -> Result<(), DomainError> {
        if self.fail_debits {
            return Err(DomainError::Store("ledger unavailable".into()));
        }
        *self
            .balances
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_insert(0) -= amount;
        Ok(())
    }

    fn credit(&self, user_id: &str, amount: i64, _description: &str) -> Result<(), DomainError> {
        *self
            .balances
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_insert(0) += amount;
        Ok(())
    }

    fn balance(&self, user_id: &str) -> Result<i64, DomainError> {
        Ok(*self.balances.lock().unwrap().get(user_id).unwrap_or(&0))
    }
}

/// Cache whose writes always fail, for best-effort verification.
pub struct FailingCache;

impl ResultCache for FailingCache {
    fn read(&self, _platform: Platform, _query: &str) -> Result<Option<CacheEntry>, DomainError> {
        Err(DomainError::Store("cache store unreachable".into()))
    }

    fn write(&self, _platform: Platform, _query: &str, _ads: &[Ad]) -> Result<(), DomainError> {
        Err(DomainError::Store("cache store unreachable".into()))
    }

    fn history(
        &self,
        _platform: Option<Platform>,
        _query: Option<&str>,
    ) -> Result<Vec<CacheEntryInfo>, DomainError> {
        Err(DomainError::Store("cache store unreachable".into()))
    }
}

/// An in-memory AdScope wired to the given fetcher, with `credits` granted
/// to the `user`.
pub fn setup(fetcher: Arc<dyn AdFetcher>, user: &str, credits: i64) -> AdScope {
    let scope = AdScope::with_providers(":memory:", fetcher, SearchConfig::default()).unwrap();
    if credits > 0 {
        scope.grant_credits(user, credits).unwrap();
    }
    scope
}

/// A plausible Meta ad-library record. `days_ago` drives the start date
/// relative to now.
pub fn meta_record(id: &str, reach: u64, page_likes: u64, days_ago: i64) -> RawRecord {
    let start = chrono::Utc::now() - chrono::Duration::days(days_ago);
    json!({
        "ad_archive_id": id,
        "is_active": true,
        "publisher_platform": ["facebook", "instagram"],
        "start_date": start.to_rfc3339(),
        "page_name": "Ralph Christian Watches",
        "page_categories": ["Jewelry/Watches"],
        "eu_total_reach": reach,
        "snapshot": {
            "page_like_count": page_likes,
            "ig_follower_count": 0,
            "cta_text": "Shop Now",
            "link_url": "https://example.com",
            "body": { "text": "Last chance to shop our sale" },
            "images": [{ "original_image_url": "https://example.com/img.jpg" }],
            "videos": []
        }
    })
}

/// A canonical ad for scorer/ranker tests; metrics are set directly.
pub fn make_ad(
    id: &str,
    cluster: CategoryCluster,
    cohort: TimeCohort,
    viral_ratio: f64,
    viral_velocity: f64,
) -> Ad {
    Ad {
        id: id.to_string(),
        platform: Platform::Meta,
        page_name: "Test Page".to_string(),
        is_active: true,
        start_date: None,
        reach_estimate: 0,
        audience_size: Ad::AUDIENCE_FLOOR,
        days_active: 1.0,
        category_cluster: cluster,
        time_cohort: cohort,
        viral_ratio,
        viral_velocity,
        efficiency_score: 0.0,
        viral_factor: 0.0,
        title: None,
        body_text: None,
        cta_text: None,
        link_url: None,
        media: Media::none(),
        page_profile_uri: None,
        avatar_url: None,
        page_categories: vec![],
        demographics: None,
    }
}
