use crate::domain::error::DomainError;
use crate::domain::ports::credit_ledger::CreditLedger;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Profiles hold the balance; every debit/grant appends a `credit_ledger`
/// log row. The read-then-update on the balance is intentionally not wrapped
/// in a transaction — matching the weak-consistency contract of the ledger
/// boundary.
pub struct SqliteCreditLedger {
    conn: Mutex<Connection>,
}

impl SqliteCreditLedger {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn current_credits(conn: &Connection, user_id: &str) -> Result<Option<i64>, DomainError> {
        conn.query_row(
            "SELECT credits FROM profiles WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| DomainError::Store(format!("Balance read failed: {e}")))
    }

    fn log_entry(
        conn: &Connection,
        user_id: &str,
        amount: i64,
        description: &str,
    ) -> Result<(), DomainError> {
        conn.execute(
            "INSERT INTO credit_ledger (id, user_id, amount, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                uuid::Uuid::new_v4().to_string(),
                user_id,
                amount,
                description,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Store(format!("Ledger log failed: {e}")))?;
        Ok(())
    }
}

impl CreditLedger for SqliteCreditLedger {
    fn has_balance(&self, user_id: &str, amount: i64) -> Result<bool, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(Self::current_credits(&conn, user_id)?.is_some_and(|c| c >= amount))
    }

    fn debit(&self, user_id: &str, amount: i64, description: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let current = Self::current_credits(&conn, user_id)?
            .ok_or_else(|| DomainError::Store(format!("No profile for user {user_id}")))?;
        conn.execute(
            "UPDATE profiles SET credits = ?1 WHERE id = ?2",
            params![current - amount, user_id],
        )
        .map_err(|e| DomainError::Store(format!("Debit failed: {e}")))?;
        Self::log_entry(&conn, user_id, -amount, description)
    }

    fn credit(&self, user_id: &str, amount: i64, description: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        match Self::current_credits(&conn, user_id)? {
            Some(current) => {
                conn.execute(
                    "UPDATE profiles SET credits = ?1 WHERE id = ?2",
                    params![current + amount, user_id],
                )
                .map_err(|e| DomainError::Store(format!("Credit failed: {e}")))?;
            }
            None => {
                conn.execute(
                    "INSERT INTO profiles (id, credits) VALUES (?1, ?2)",
                    params![user_id, amount],
                )
                .map_err(|e| DomainError::Store(format!("Profile create failed: {e}")))?;
            }
        }
        Self::log_entry(&conn, user_id, amount, description)
    }

    fn balance(&self, user_id: &str) -> Result<i64, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(Self::current_credits(&conn, user_id)?.unwrap_or(0))
    }
}
