//! Deduplication and final ordering of a scored batch.

use crate::domain::entities::ad::Ad;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

/// Requested result ordering. `Score` is the efficiency ranking; `Newest`
/// orders by launch date for freshness-focused browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Score,
    Newest,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "score" | "relevancy" => Ok(SortBy::Score),
            "newest" => Ok(SortBy::Newest),
            _ => Err(format!("Unknown sort: {s} (expected score or newest)")),
        }
    }
}

/// Drop duplicate ids, keeping the first occurrence. Emission order of the
/// survivors is preserved.
pub fn dedupe(ads: Vec<Ad>) -> Vec<Ad> {
    let mut seen: HashSet<String> = HashSet::with_capacity(ads.len());
    ads.into_iter()
        .filter(|ad| seen.insert(ad.id.clone()))
        .collect()
}

/// Sort descending by the requested key. The sort is stable, so ads with
/// equal keys keep the normalizer's emission order.
pub fn rank(mut ads: Vec<Ad>, sort_by: SortBy) -> Vec<Ad> {
    match sort_by {
        SortBy::Score => ads.sort_by(|a, b| {
            b.efficiency_score
                .partial_cmp(&a.efficiency_score)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Newest => ads.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
    }
    ads
}
