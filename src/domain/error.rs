use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Insufficient credits: {required} required")]
    InsufficientCredits { required: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Store(s)
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}
