use crate::domain::error::DomainError;

/// Credit-ledger collaborator. The check-then-debit sequence is a
/// read-modify-write over shared state with no transactional guarantee;
/// concurrent requests from the same identity can race past the check.
pub trait CreditLedger: Send + Sync {
    fn has_balance(&self, user_id: &str, amount: i64) -> Result<bool, DomainError>;

    /// Deduct `amount` and append a ledger log row. Not retried on failure.
    fn debit(&self, user_id: &str, amount: i64, description: &str) -> Result<(), DomainError>;

    /// Grant credits (creates the profile if absent).
    fn credit(&self, user_id: &str, amount: i64, description: &str) -> Result<(), DomainError>;

    fn balance(&self, user_id: &str) -> Result<i64, DomainError>;
}
