use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Commercial-intent cluster an ad is benchmarked within. `B` (services/B2B)
/// takes precedence over `C` (entertainment/media) when an ad matches both;
/// `A` (e-commerce/general) is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryCluster {
    #[default]
    A,
    B,
    C,
}

impl fmt::Display for CategoryCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryCluster::A => write!(f, "A"),
            CategoryCluster::B => write!(f, "B"),
            CategoryCluster::C => write!(f, "C"),
        }
    }
}

impl FromStr for CategoryCluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(CategoryCluster::A),
            "B" => Ok(CategoryCluster::B),
            "C" => Ok(CategoryCluster::C),
            _ => Err(format!("Unknown category cluster: {s}")),
        }
    }
}
