//! In-memory source for testing without a database.

use super::{SourceError, TransactionSource};
use crate::domain::{Expense, Transaction};
use crate::engine::DateRange;
use async_trait::async_trait;

/// Mock source that returns predefined records.
#[derive(Debug, Clone, Default)]
pub struct MockTransactionSource {
    transactions: Vec<Transaction>,
    expenses: Vec<Expense>,
    failure: Option<String>,
}

impl MockTransactionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(mut self, tx: Transaction) -> Self {
        self.transactions.push(tx);
        self
    }

    pub fn with_transactions(mut self, txs: Vec<Transaction>) -> Self {
        self.transactions.extend(txs);
        self
    }

    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Make every fetch fail with `Unavailable(message)`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn check(&self) -> Result<(), SourceError> {
        match &self.failure {
            Some(msg) => Err(SourceError::Unavailable(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TransactionSource for MockTransactionSource {
    async fn fetch_transactions(&self, range: &DateRange) -> Result<Vec<Transaction>, SourceError> {
        self.check()?;
        Ok(self
            .transactions
            .iter()
            .filter(|t| range.includes(t))
            .cloned()
            .collect())
    }

    async fn fetch_expenses(&self, range: &DateRange) -> Result<Vec<Expense>, SourceError> {
        self.check()?;
        Ok(self
            .expenses
            .iter()
            .filter(|e| range.includes_expense(e))
            .cloned()
            .collect())
    }
}
