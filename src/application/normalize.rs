//! Raw record → canonical [`Ad`] conversion.
//!
//! One raw provider record in, one `Ad` out — or `None` when the record is
//! unusable (error-marked, no creative snapshot, no stable id). Every metric
//! resolves through a fallback chain so that arbitrarily missing nested
//! fields degrade to documented defaults instead of faults.

use crate::application::extract::{as_u64_lossy, first_present, first_str, first_u64, is_empty};
use crate::domain::entities::ad::Ad;
use crate::domain::values::media::Media;
use crate::domain::values::platform::Platform;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

/// Normalize one record against the current wall clock.
pub fn normalize(record: &Value, platform: Platform) -> Option<Ad> {
    normalize_at(record, platform, Utc::now())
}

/// Normalize with an explicit `now`, so age-derived metrics are testable.
pub fn normalize_at(record: &Value, platform: Platform, now: DateTime<Utc>) -> Option<Ad> {
    // Failed fetches come back as records with an error marker.
    if record
        .get("error")
        .or_else(|| record.get("errorMessage"))
        .map(|v| !is_empty(v))
        .unwrap_or(false)
    {
        return None;
    }

    let snapshot = record.get("snapshot").filter(|s| !is_empty(s));
    let has_text_container = !is_empty(record.get("text").unwrap_or(&Value::Null));
    if snapshot.is_none() && !has_text_container {
        return None;
    }

    // A record without a stable identifier is rejected, never defaulted.
    let id = resolve_id(record)?;

    let reach_estimate = resolve_reach(record);
    let audience_size = resolve_audience(record, platform);

    let start_date =
        first_present(record, &[&["start_date"], &["start_date_string"], &["createTimeISO"]])
            .and_then(parse_start_date);
    let days_active = match start_date {
        Some(dt) => ((now - dt).num_seconds() as f64 / 86_400.0).max(Ad::MIN_DAYS_ACTIVE),
        // Unparseable or absent start: assume one day old.
        None => 1.0,
    };

    let viral_ratio = reach_estimate as f64 / audience_size as f64;
    let viral_velocity = viral_ratio / days_active;

    Some(Ad {
        id,
        platform,
        page_name: first_str(
            record,
            &[&["snapshot", "page_name"], &["page_name"], &["authorMeta", "nickName"]],
        )
        .unwrap_or("Unknown Page")
        .to_string(),
        is_active: record
            .get("is_active")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        start_date,
        reach_estimate,
        audience_size,
        days_active,
        category_cluster: Default::default(),
        time_cohort: Default::default(),
        viral_ratio,
        viral_velocity,
        efficiency_score: 0.0,
        viral_factor: 0.0,
        title: first_str(record, &[&["snapshot", "title"], &["snapshot", "caption"]])
            .map(String::from),
        body_text: resolve_body_text(record),
        cta_text: first_str(record, &[&["snapshot", "cta_text"], &["cta_text"]]).map(String::from),
        link_url: first_str(record, &[&["snapshot", "link_url"], &["webVideoUrl"]])
            .map(String::from),
        media: resolve_media(record),
        page_profile_uri: first_str(
            record,
            &[&["page_profile_uri"], &["authorMeta", "profileUrl"]],
        )
        .map(String::from),
        avatar_url: first_str(
            record,
            &[&["snapshot", "page_profile_picture_url"], &["authorMeta", "avatarUrl"]],
        )
        .map(String::from),
        page_categories: resolve_categories(record),
        demographics: first_present(record, &[&["demographics"]]).cloned(),
    })
}

fn resolve_id(record: &Value) -> Option<String> {
    let v = first_present(record, &[&["ad_archive_id"], &["id"], &["adArchiveID"]])?;
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reach fallback chain: EU transparency totals, then the generic reach
/// estimate (scalar or range upper bound), then the impression index (whose
/// `-1` "unknown" sentinel clamps to zero), then TikTok play counts.
fn resolve_reach(record: &Value) -> u64 {
    if let Some(reach) = first_u64(record, &[&["eu_total_reach"], &["aaa_info", "eu_total_reach"]])
    {
        return reach;
    }
    if let Some(v) = first_present(record, &[&["reach_estimate"], &["targeting", "reach_estimate"]])
    {
        let scalar = match v {
            Value::Object(o) => o
                .get("upper_bound")
                .or_else(|| o.get("lower_bound"))
                .and_then(as_u64_lossy),
            other => as_u64_lossy(other),
        };
        if let Some(reach) = scalar {
            return reach;
        }
    }
    if let Some(idx) = first_u64(record, &[&["impressions_with_index", "impressions_index"]]) {
        return idx;
    }
    first_u64(record, &[&["playCount"]]).unwrap_or(0)
}

/// Platform-aware audience resolution. An ad that ran only on Facebook uses
/// the page like count, only on Instagram the IG follower count, and both or
/// unknown the sum. Floored at [`Ad::AUDIENCE_FLOOR`].
fn resolve_audience(record: &Value, platform: Platform) -> u64 {
    let raw = match platform {
        Platform::Tiktok => first_u64(record, &[&["authorMeta", "fans"]]).unwrap_or(0),
        Platform::Meta => {
            let fb = first_u64(record, &[&["snapshot", "page_like_count"], &["likes"]])
                .unwrap_or(0);
            let ig = first_u64(
                record,
                &[&["snapshot", "ig_follower_count"], &["ig_follower_count"]],
            )
            .unwrap_or(0);
            let platforms: Vec<String> = record
                .get("publisher_platform")
                .and_then(Value::as_array)
                .map(|a| {
                    a.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_lowercase)
                        .collect()
                })
                .unwrap_or_default();
            let on_facebook = platforms.iter().any(|p| p != "instagram");
            let on_instagram = platforms.iter().any(|p| p == "instagram");
            match (on_facebook, on_instagram) {
                (true, false) => fb,
                (false, true) => ig,
                // Ran on both, or placement unknown: count the whole base.
                _ => fb + ig,
            }
        }
    };
    raw.max(Ad::AUDIENCE_FLOOR)
}

/// Explicit video/image lists first; a carousel synthesizes one image from
/// the first card's best available image field.
fn resolve_media(record: &Value) -> Media {
    let Some(snap) = record.get("snapshot").filter(|s| s.is_object()) else {
        // TikTok records carry their creative at the top level.
        if let Some(cover) = first_str(record, &[&["videoMeta", "coverUrl"]]) {
            let url = first_str(record, &[&["webVideoUrl"]]).map(String::from);
            return Media::video(url, Some(cover.to_string()));
        }
        return Media::none();
    };

    if let Some(video) = snap.get("videos").and_then(Value::as_array).and_then(|a| a.first()) {
        let url = first_str(video, &[&["video_hd_url"], &["video_sd_url"]]).map(String::from);
        let poster = first_str(video, &[&["video_preview_image_url"]]).map(String::from);
        if url.is_some() || poster.is_some() {
            return Media::video(url, poster);
        }
    }
    if let Some(image) = snap.get("images").and_then(Value::as_array).and_then(|a| a.first()) {
        if let Some(url) = first_str(image, &[&["original_image_url"], &["resized_image_url"]]) {
            return Media::image(url.to_string());
        }
    }
    if let Some(card) = snap.get("cards").and_then(Value::as_array).and_then(|a| a.first()) {
        if let Some(url) = first_str(
            card,
            &[&["original_image_url"], &["resized_image_url"], &["video_preview_image_url"]],
        ) {
            return Media::carousel(url.to_string());
        }
    }
    Media::none()
}

fn resolve_body_text(record: &Value) -> Option<String> {
    if let Some(text) = first_str(record, &[&["snapshot", "body", "text"]]) {
        return Some(text.to_string());
    }
    if let Some(card) = record
        .get("snapshot")
        .and_then(|s| s.get("cards"))
        .and_then(Value::as_array)
        .and_then(|a| a.first())
    {
        if let Some(text) = first_str(card, &[&["body", "text"], &["body"]]) {
            return Some(text.to_string());
        }
    }
    first_str(record, &[&["text"]]).map(String::from)
}

fn resolve_categories(record: &Value) -> Vec<String> {
    first_present(record, &[&["page_categories"], &["snapshot", "page_categories"]])
        .and_then(Value::as_array)
        .map(|a| {
            a.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a start timestamp that may be an ISO date, a full RFC3339 datetime,
/// or Unix seconds (numeric or stringified). `None` means the caller applies
/// the age default; a parse failure is never a fault.
pub fn parse_start_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .filter(|ts| *ts > 0)
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return date
                    .and_hms_opt(0, 0, 0)
                    .map(|ndt| Utc.from_utc_datetime(&ndt));
            }
            if let Ok(ts) = s.parse::<i64>() {
                if ts > 0 {
                    return Utc.timestamp_opt(ts, 0).single();
                }
            }
            None
        }
        _ => None,
    }
}
