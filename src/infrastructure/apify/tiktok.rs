//! Run input for the TikTok scraper actor. The keyword is treated as a
//! hashtag; video downloads stay off to keep run costs down, covers stay on
//! so results still carry a preview image.

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TiktokRunInput {
    pub hashtags: Vec<String>,
    pub results_per_page: usize,
    pub should_download_videos: bool,
    pub should_download_covers: bool,
}

pub fn run_input(query: &str, limit: usize) -> TiktokRunInput {
    TiktokRunInput {
        hashtags: vec![query.replace(' ', "")],
        results_per_page: limit,
        should_download_videos: false,
        should_download_covers: true,
    }
}
