mod common;

use adscope::application::benchmark::{efficiency_score, score_batch};
use adscope::domain::values::category_cluster::CategoryCluster;
use adscope::domain::values::time_cohort::TimeCohort;
use common::make_ad;

#[test]
fn small_buckets_use_heuristic_factors() {
    // One ad per cluster: every bucket is below the statistical minimum.
    let mut ads = vec![
        make_ad("a", CategoryCluster::A, TimeCohort::Launch, 1.0, 0.4),
        make_ad("b", CategoryCluster::B, TimeCohort::Launch, 1.0, 0.4),
        make_ad("c", CategoryCluster::C, TimeCohort::Launch, 1.0, 0.4),
    ];
    score_batch(&mut ads);
    assert_eq!(ads[0].efficiency_score, efficiency_score(0.4 * 1.0 * 5.0));
    assert_eq!(ads[1].efficiency_score, efficiency_score(0.4 * 3.0 * 5.0));
    assert_eq!(ads[2].efficiency_score, efficiency_score(0.4 * 0.5 * 5.0));
}

#[test]
fn statistical_bucket_normalizes_against_its_average() {
    // Three ads in one bucket: benchmark = 2.0, norm factor = 2.0/2.0 = 1.0.
    let mut ads = vec![
        make_ad("a", CategoryCluster::A, TimeCohort::Trending, 1.0, 1.0),
        make_ad("b", CategoryCluster::A, TimeCohort::Trending, 1.0, 2.0),
        make_ad("c", CategoryCluster::A, TimeCohort::Trending, 1.0, 3.0),
    ];
    score_batch(&mut ads);
    for (ad, velocity) in ads.iter().zip([1.0, 2.0, 3.0]) {
        assert_eq!(ad.efficiency_score, efficiency_score(velocity * 5.0));
    }
}

#[test]
fn norm_factor_is_capped_for_dead_buckets() {
    // Average velocity 0.01 floors to 0.05; 2.0/0.05 = 40 caps at 10.
    let mut ads = vec![
        make_ad("a", CategoryCluster::A, TimeCohort::Launch, 1.0, 0.01),
        make_ad("b", CategoryCluster::A, TimeCohort::Launch, 1.0, 0.01),
        make_ad("c", CategoryCluster::A, TimeCohort::Launch, 1.0, 0.01),
    ];
    score_batch(&mut ads);
    assert_eq!(ads[0].efficiency_score, efficiency_score(0.01 * 10.0 * 5.0));
}

#[test]
fn heuristic_batch_preserves_velocity_order() {
    // Five cluster-A ads spread so every bucket stays under 3 members: all
    // share norm factor 1.0 and score order must match raw velocity order.
    let velocities = [0.9, 0.1, 2.4, 0.6, 1.5];
    let cohorts = [
        TimeCohort::Launch,
        TimeCohort::Launch,
        TimeCohort::Trending,
        TimeCohort::Trending,
        TimeCohort::Established,
    ];
    let mut ads: Vec<_> = velocities
        .iter()
        .zip(cohorts)
        .enumerate()
        .map(|(i, (v, cohort))| make_ad(&format!("ad{i}"), CategoryCluster::A, cohort, 1.0, *v))
        .collect();
    score_batch(&mut ads);

    let mut by_score = ads.clone();
    by_score.sort_by(|a, b| b.efficiency_score.partial_cmp(&a.efficiency_score).unwrap());
    let mut by_velocity = ads.clone();
    by_velocity.sort_by(|a, b| b.viral_velocity.partial_cmp(&a.viral_velocity).unwrap());

    let score_ids: Vec<_> = by_score.iter().map(|a| a.id.clone()).collect();
    let velocity_ids: Vec<_> = by_velocity.iter().map(|a| a.id.clone()).collect();
    assert_eq!(score_ids, velocity_ids);
}

#[test]
fn zero_reach_scores_zero() {
    let mut ads = vec![
        make_ad("zero", CategoryCluster::A, TimeCohort::Launch, 0.0, 0.0),
        make_ad("live", CategoryCluster::A, TimeCohort::Launch, 2.0, 1.0),
    ];
    score_batch(&mut ads);
    assert_eq!(ads[0].efficiency_score, 0.0);
    assert_eq!(ads[0].viral_factor, 0.0);
    assert!(ads[1].efficiency_score > 0.0);
}

#[test]
fn every_ad_is_scored_within_bounds() {
    let mut ads: Vec<_> = (0..20)
        .map(|i| {
            make_ad(
                &format!("ad{i}"),
                CategoryCluster::B,
                TimeCohort::Trending,
                i as f64,
                (i as f64) * 37.0,
            )
        })
        .collect();
    score_batch(&mut ads);
    for ad in &ads {
        assert!(ad.efficiency_score >= 0.0 && ad.efficiency_score <= 100.0);
        assert!(ad.viral_factor >= 0.0);
    }
}

#[test]
fn viral_factor_is_relative_to_batch_average() {
    let mut ads = vec![
        make_ad("low", CategoryCluster::A, TimeCohort::Launch, 1.0, 1.0),
        make_ad("high", CategoryCluster::A, TimeCohort::Launch, 3.0, 3.0),
    ];
    score_batch(&mut ads);
    // Batch average ratio is 2.0.
    assert_eq!(ads[0].viral_factor, 0.5);
    assert_eq!(ads[1].viral_factor, 1.5);
}

#[test]
fn tiny_average_ratio_is_floored() {
    let mut ads = vec![
        make_ad("a", CategoryCluster::A, TimeCohort::Launch, 0.02, 0.02),
        make_ad("b", CategoryCluster::A, TimeCohort::Launch, 0.02, 0.02),
    ];
    score_batch(&mut ads);
    // Average 0.02 floors to 0.1: factor = 0.02 / 0.1.
    assert_eq!(ads[0].viral_factor, 0.2);
}
