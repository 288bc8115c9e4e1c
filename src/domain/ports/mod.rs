pub mod ad_fetcher;
pub mod credit_ledger;
pub mod result_cache;
