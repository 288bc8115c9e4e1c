//! Run input for the Facebook Ad Library actor. The actor takes the public
//! ad-library search URL itself, so the query and country are encoded into
//! that URL rather than passed as separate fields.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StartUrl {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaRunInput {
    pub urls: Vec<StartUrl>,
    pub max_items: usize,
}

pub fn run_input(query: &str, country: &str, limit: usize) -> MetaRunInput {
    MetaRunInput {
        urls: vec![StartUrl {
            url: search_url(query, country),
        }],
        max_items: limit,
    }
}

fn search_url(query: &str, country: &str) -> String {
    reqwest::Url::parse_with_params(
        "https://www.facebook.com/ads/library/",
        &[
            ("active_status", "all"),
            ("ad_type", "all"),
            ("country", country),
            ("q", query),
            ("sort_data[direction]", "desc"),
            ("sort_data[mode]", "relevancy_monthly_grouped"),
            ("media_type", "all"),
        ],
    )
    .map(Into::into)
    .unwrap_or_else(|_| {
        format!("https://www.facebook.com/ads/library/?active_status=all&ad_type=all&country={country}&q={query}")
    })
}
