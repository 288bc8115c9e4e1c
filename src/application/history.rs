use crate::domain::error::DomainError;
use crate::domain::ports::result_cache::{CacheEntryInfo, ResultCache};
use crate::domain::values::platform::Platform;
use std::sync::Arc;

/// Lists past search entries (the append-only cache log), newest first.
pub struct HistoryUseCase {
    cache: Arc<dyn ResultCache>,
}

impl HistoryUseCase {
    pub fn new(cache: Arc<dyn ResultCache>) -> Self {
        Self { cache }
    }

    pub fn execute(
        &self,
        platform: Option<Platform>,
        query: Option<&str>,
    ) -> Result<Vec<CacheEntryInfo>, DomainError> {
        self.cache.history(platform, query)
    }
}
