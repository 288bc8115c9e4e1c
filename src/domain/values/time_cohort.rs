use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time-since-launch peer group. Boundaries are inclusive on the lower
/// cohort: an ad exactly 3 days old is still `Launch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeCohort {
    #[default]
    Launch,
    Trending,
    Established,
    Evergreen,
}

impl TimeCohort {
    /// Classify by age in days: `≤3 Launch`, `≤14 Trending`,
    /// `≤30 Established`, else `Evergreen`.
    pub fn from_days_active(days: f64) -> Self {
        if days <= 3.0 {
            TimeCohort::Launch
        } else if days <= 14.0 {
            TimeCohort::Trending
        } else if days <= 30.0 {
            TimeCohort::Established
        } else {
            TimeCohort::Evergreen
        }
    }
}

impl fmt::Display for TimeCohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeCohort::Launch => write!(f, "LAUNCH"),
            TimeCohort::Trending => write!(f, "TRENDING"),
            TimeCohort::Established => write!(f, "ESTABLISHED"),
            TimeCohort::Evergreen => write!(f, "EVERGREEN"),
        }
    }
}

impl FromStr for TimeCohort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LAUNCH" => Ok(TimeCohort::Launch),
            "TRENDING" => Ok(TimeCohort::Trending),
            "ESTABLISHED" => Ok(TimeCohort::Established),
            "EVERGREEN" => Ok(TimeCohort::Evergreen),
            _ => Err(format!("Unknown time cohort: {s}")),
        }
    }
}
