use crate::domain::error::DomainError;
use crate::domain::ports::credit_ledger::CreditLedger;
use std::sync::Arc;

pub struct CreditsUseCase {
    ledger: Arc<dyn CreditLedger>,
}

impl CreditsUseCase {
    pub fn new(ledger: Arc<dyn CreditLedger>) -> Self {
        Self { ledger }
    }

    pub fn balance(&self, user_id: &str) -> Result<i64, DomainError> {
        self.ledger.balance(user_id)
    }

    pub fn grant(&self, user_id: &str, amount: i64) -> Result<(), DomainError> {
        if amount <= 0 {
            return Err(DomainError::InvalidInput(
                "grant amount must be positive".into(),
            ));
        }
        self.ledger.credit(user_id, amount, "Credit grant")
    }
}
