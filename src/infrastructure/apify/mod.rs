//! Apify actor client. One synchronous actor run per cache miss; retry,
//! backoff and proxying are the provider's concern, not this client's.

pub mod meta;
pub mod tiktok;

use crate::domain::ports::ad_fetcher::{AdFetcher, RawRecord};
use crate::domain::values::platform::Platform;
use std::time::Duration;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Facebook Ad Library scraper (curious_coder).
const META_AD_LIBRARY_ACTOR: &str = "XtaWFhbtfxyzqrFmd";

/// clockworks/tiktok-scraper, addressed by name.
const TIKTOK_SCRAPER_ACTOR: &str = "clockworks~tiktok-scraper";

pub struct ApifyFetcher {
    client: reqwest::Client,
    token: String,
}

impl ApifyFetcher {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(300))
                .build()
                .unwrap_or_default(),
            token,
        }
    }

    async fn run_actor<I: serde::Serialize>(
        &self,
        actor: &str,
        input: &I,
    ) -> Result<Vec<RawRecord>, String> {
        let url = format!("{BASE_URL}/acts/{actor}/run-sync-get-dataset-items");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await
            .map_err(|e| format!("Apify request error: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Apify {status}: {body}"));
        }

        resp.json::<Vec<RawRecord>>()
            .await
            .map_err(|e| format!("Apify response parse error: {e}"))
    }
}

#[async_trait::async_trait]
impl AdFetcher for ApifyFetcher {
    async fn fetch_batch(
        &self,
        query: &str,
        platform: Platform,
        country: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, String> {
        match platform {
            Platform::Meta => {
                let input = meta::run_input(query, country, limit);
                self.run_actor(META_AD_LIBRARY_ACTOR, &input).await
            }
            Platform::Tiktok => {
                let input = tiktok::run_input(query, limit);
                self.run_actor(TIKTOK_SCRAPER_ACTOR, &input).await
            }
        }
    }
}
