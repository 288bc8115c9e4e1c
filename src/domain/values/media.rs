use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Carousel,
    None,
}

/// Best available creative for an ad. `poster` is the preview frame for
/// video creatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    pub url: Option<String>,
    pub poster: Option<String>,
}

impl Media {
    pub fn none() -> Self {
        Self {
            kind: MediaKind::None,
            url: None,
            poster: None,
        }
    }

    pub fn image(url: String) -> Self {
        Self {
            kind: MediaKind::Image,
            url: Some(url),
            poster: None,
        }
    }

    pub fn video(url: Option<String>, poster: Option<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url,
            poster,
        }
    }

    pub fn carousel(url: String) -> Self {
        Self {
            kind: MediaKind::Carousel,
            url: Some(url),
            poster: None,
        }
    }
}
