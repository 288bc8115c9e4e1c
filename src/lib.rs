pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::credits::CreditsUseCase;
use crate::application::history::HistoryUseCase;
use crate::application::search::{SearchConfig, SearchRequest, SearchResponse, SearchUseCase};
use crate::domain::error::DomainError;
use crate::domain::ports::ad_fetcher::AdFetcher;
use crate::domain::ports::credit_ledger::CreditLedger;
use crate::domain::ports::result_cache::{CacheEntryInfo, ResultCache};
use crate::domain::values::platform::Platform;
use crate::infrastructure::apify::ApifyFetcher;
use crate::infrastructure::sqlite::cache_repo::SqliteResultCache;
use crate::infrastructure::sqlite::ledger_repo::SqliteCreditLedger;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::Arc;

pub struct AdScope {
    search_uc: SearchUseCase,
    history_uc: HistoryUseCase,
    credits_uc: CreditsUseCase,
}

impl AdScope {
    /// Production wiring: Apify fetcher from the environment, sqlite cache
    /// and ledger at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let token = std::env::var("ADSCOPE_APIFY_TOKEN").unwrap_or_default();
        let fetcher: Arc<dyn AdFetcher> = Arc::new(ApifyFetcher::new(token));
        Self::with_providers(db_path, fetcher, SearchConfig::default())
    }

    /// Wiring with an injected fetcher — every test runs against this.
    pub fn with_providers(
        db_path: &str,
        fetcher: Arc<dyn AdFetcher>,
        config: SearchConfig,
    ) -> Result<Self, DomainError> {
        let conn1 = Connection::open(db_path)
            .map_err(|e| DomainError::Store(format!("DB error: {e}")))?;
        conn1
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Store(format!("WAL error: {e}")))?;
        let conn2 = Connection::open(db_path)
            .map_err(|e| DomainError::Store(format!("DB error: {e}")))?;
        conn2
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Store(format!("WAL error: {e}")))?;

        // Each connection migrates itself so `:memory:` databases (one per
        // connection) get the schema too.
        run_migrations(&conn1)?;
        run_migrations(&conn2)?;

        let cache: Arc<dyn ResultCache> = Arc::new(SqliteResultCache::new(conn1));
        let ledger: Arc<dyn CreditLedger> = Arc::new(SqliteCreditLedger::new(conn2));
        Ok(Self::with_collaborators(fetcher, cache, ledger, config))
    }

    /// Fully explicit wiring; mock any collaborator.
    pub fn with_collaborators(
        fetcher: Arc<dyn AdFetcher>,
        cache: Arc<dyn ResultCache>,
        ledger: Arc<dyn CreditLedger>,
        config: SearchConfig,
    ) -> Self {
        Self {
            search_uc: SearchUseCase::new(fetcher, cache.clone(), ledger.clone(), config),
            history_uc: HistoryUseCase::new(cache),
            credits_uc: CreditsUseCase::new(ledger),
        }
    }

    pub async fn search(
        &self,
        user_id: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, DomainError> {
        self.search_uc.execute(user_id, request).await
    }

    pub fn history(
        &self,
        platform: Option<Platform>,
        query: Option<&str>,
    ) -> Result<Vec<CacheEntryInfo>, DomainError> {
        self.history_uc.execute(platform, query)
    }

    pub fn credit_balance(&self, user_id: &str) -> Result<i64, DomainError> {
        self.credits_uc.balance(user_id)
    }

    pub fn grant_credits(&self, user_id: &str, amount: i64) -> Result<(), DomainError> {
        self.credits_uc.grant(user_id, amount)
    }
}
