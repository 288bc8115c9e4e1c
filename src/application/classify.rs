//! Cohort classification: category cluster + time-since-launch cohort.
//!
//! Cluster detection is a case-insensitive substring match over the page's
//! category tags plus an exact match on the normalized call-to-action.
//! Service/B2B intent (`B`) is checked before entertainment (`C`): an ad
//! matching both keyword sets is `B`, so commercial intent is never penalized
//! by an incidental content-category overlap.

use crate::domain::entities::ad::Ad;
use crate::domain::values::category_cluster::CategoryCluster;
use crate::domain::values::time_cohort::TimeCohort;

/// Service/B2B category markers: medical, legal, education, recruiting,
/// consulting and adjacent verticals.
const SERVICE_KEYWORDS: &[&str] = &[
    "medical", "dental", "clinic", "doctor", "health", "legal", "law", "attorney", "education",
    "school", "university", "course", "training", "recruit", "hiring", "career", "consult",
    "coaching", "agency", "finance", "insurance", "real estate", "software", "b2b",
];

/// Entertainment/media category markers.
const ENTERTAINMENT_KEYWORDS: &[&str] = &[
    "entertainment", "music", "movie", "film", "video", "game", "gaming", "meme", "comedy",
    "media", "tv", "show", "sport", "celebrity", "magazine", "news",
];

/// CTAs that signal a direct commercial relationship.
const HIGH_INTENT_CTAS: &[&str] = &[
    "book now", "contact us", "apply now", "sign up", "get quote", "request time",
];

/// CTAs that signal passive consumption.
const LOW_INTENT_CTAS: &[&str] = &["watch more", "like page", "play game", "listen now"];

pub fn category_cluster(categories: &[String], cta_text: Option<&str>) -> CategoryCluster {
    let tags = categories.join(" ").to_lowercase();
    let cta = cta_text.map(|c| c.trim().to_lowercase()).unwrap_or_default();

    if SERVICE_KEYWORDS.iter().any(|k| tags.contains(k))
        || HIGH_INTENT_CTAS.contains(&cta.as_str())
    {
        return CategoryCluster::B;
    }
    if ENTERTAINMENT_KEYWORDS.iter().any(|k| tags.contains(k))
        || LOW_INTENT_CTAS.contains(&cta.as_str())
    {
        return CategoryCluster::C;
    }
    CategoryCluster::A
}

/// Assign both cohort dimensions in place.
pub fn assign(ad: &mut Ad) {
    ad.time_cohort = TimeCohort::from_days_active(ad.days_active);
    ad.category_cluster = category_cluster(&ad.page_categories, ad.cta_text.as_deref());
}
