use crate::domain::values::category_cluster::CategoryCluster;
use crate::domain::values::media::Media;
use crate::domain::values::platform::Platform;
use crate::domain::values::time_cohort::TimeCohort;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical ad entity produced by the normalizer. Created fresh per search,
/// never mutated after the scorer assigns `efficiency_score`/`viral_factor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    /// Stable per-platform identifier. A record without one is rejected
    /// upstream, so this is never empty.
    pub id: String,
    pub platform: Platform,
    pub page_name: String,
    pub is_active: bool,
    /// Resolved launch timestamp; `None` means the age default (1 day) was
    /// applied.
    pub start_date: Option<DateTime<Utc>>,

    /// Best-effort estimate of distinct people shown the ad.
    pub reach_estimate: u64,
    /// Advertiser's follower/like base, floored at
    /// [`AUDIENCE_FLOOR`](Ad::AUDIENCE_FLOOR).
    pub audience_size: u64,
    /// Days since launch, floored at 0.5.
    pub days_active: f64,

    pub category_cluster: CategoryCluster,
    pub time_cohort: TimeCohort,

    /// reach / audience — how far the ad traveled beyond its built-in base.
    pub viral_ratio: f64,
    /// viral_ratio / days_active — rate of spread.
    pub viral_velocity: f64,
    /// Cohort-normalized, log-compressed 0–100 ranking value. Assigned by
    /// the benchmark scorer.
    pub efficiency_score: f64,
    /// Linear multiplier versus the batch-average viral ratio. Assigned by
    /// the benchmark scorer.
    pub viral_factor: f64,

    // Descriptive passthrough, no invariants.
    pub title: Option<String>,
    pub body_text: Option<String>,
    pub cta_text: Option<String>,
    pub link_url: Option<String>,
    pub media: Media,
    pub page_profile_uri: Option<String>,
    pub avatar_url: Option<String>,
    pub page_categories: Vec<String>,
    pub demographics: Option<serde_json::Value>,
}

impl Ad {
    /// Minimum audience denominator. Small or unknown pages would otherwise
    /// blow up the viral ratio.
    pub const AUDIENCE_FLOOR: u64 = 1000;

    /// Minimum age denominator in days. Same-day ads would otherwise blow up
    /// the velocity.
    pub const MIN_DAYS_ACTIVE: f64 = 0.5;
}
