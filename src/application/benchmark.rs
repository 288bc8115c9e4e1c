//! Cohort-relative benchmark scoring.
//!
//! A raw viral ratio is meaningless without a peer comparison: a ratio of 3
//! is exceptional for a three-day-old B2B service ad and unremarkable for a
//! month-old meme page. Ads are bucketed by (cluster, cohort) and normalized
//! against their bucket's average velocity, then log-compressed into a 0–100
//! score — velocity is long-tailed, and a linear scale would flatten the
//! bulk of the batch against a handful of outliers.

use crate::domain::entities::ad::Ad;
use crate::domain::values::category_cluster::CategoryCluster;
use crate::domain::values::time_cohort::TimeCohort;
use std::collections::HashMap;

/// Buckets below this size have no statistical signal and fall back to the
/// per-cluster heuristic factors.
const MIN_BUCKET_SIZE: usize = 3;
/// Floor on a bucket's average velocity, so near-dead buckets don't produce
/// extreme normalization factors.
const BENCHMARK_FLOOR: f64 = 0.05;
const NORM_FACTOR_CAP: f64 = 10.0;
/// Rescales velocity units into the domain the compression curve expects.
const VELOCITY_SCALE: f64 = 5.0;
const SCORE_CURVE: f64 = 18.0;
const MAX_SCORE: f64 = 100.0;
/// Floor on the batch-average viral ratio used for the viral factor.
const GLOBAL_RATIO_FLOOR: f64 = 0.1;

fn heuristic_factor(cluster: CategoryCluster) -> f64 {
    match cluster {
        CategoryCluster::B => 3.0,
        CategoryCluster::C => 0.5,
        CategoryCluster::A => 1.0,
    }
}

/// Assign `efficiency_score` and `viral_factor` to every ad in the batch.
pub fn score_batch(ads: &mut [Ad]) {
    if ads.is_empty() {
        return;
    }

    let mut buckets: HashMap<(CategoryCluster, TimeCohort), Vec<f64>> = HashMap::new();
    for ad in ads.iter() {
        buckets
            .entry((ad.category_cluster, ad.time_cohort))
            .or_default()
            .push(ad.viral_velocity);
    }

    let factors: HashMap<(CategoryCluster, TimeCohort), f64> = buckets
        .into_iter()
        .map(|(key, velocities)| {
            let factor = if velocities.len() >= MIN_BUCKET_SIZE {
                let benchmark = (velocities.iter().sum::<f64>() / velocities.len() as f64)
                    .max(BENCHMARK_FLOOR);
                (2.0 / benchmark).min(NORM_FACTOR_CAP)
            } else {
                heuristic_factor(key.0)
            };
            (key, factor)
        })
        .collect();

    let global_average_ratio = (ads.iter().map(|a| a.viral_ratio).sum::<f64>()
        / ads.len() as f64)
        .max(GLOBAL_RATIO_FLOOR);

    for ad in ads.iter_mut() {
        let norm_factor = factors[&(ad.category_cluster, ad.time_cohort)];
        ad.efficiency_score = efficiency_score(ad.viral_velocity * norm_factor * VELOCITY_SCALE);
        // Linear on purpose: presented as "12.5× the average ad in this
        // search", not as a ranking score.
        ad.viral_factor = round1(ad.viral_ratio / global_average_ratio);
    }
}

/// Log-compress an adjusted velocity into [0, 100]. Zero or negative input
/// maps to zero.
pub fn efficiency_score(adjusted_velocity: f64) -> f64 {
    if adjusted_velocity <= 0.0 {
        return 0.0;
    }
    round1((SCORE_CURVE * (1.0 + adjusted_velocity).log2()).min(MAX_SCORE))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
