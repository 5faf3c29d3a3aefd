//! Transaction source abstraction: where report snapshots are fetched from.

use crate::db::Repository;
use crate::domain::{Expense, Transaction};
use crate::engine::DateRange;
use async_trait::async_trait;
use std::fmt;

pub mod mock;

pub use mock::MockTransactionSource;

/// Supplies transaction and expense snapshots to the reporting layer.
#[async_trait]
pub trait TransactionSource: Send + Sync + fmt::Debug {
    /// Fetch transactions whose effective date falls in `range`.
    ///
    /// No ordering is promised; every engine fold is order-independent.
    async fn fetch_transactions(&self, range: &DateRange) -> Result<Vec<Transaction>, SourceError>;

    /// Fetch expenses spent within `range`.
    async fn fetch_expenses(&self, range: &DateRange) -> Result<Vec<Expense>, SourceError>;
}

/// Error type for source operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        SourceError::Storage(err.to_string())
    }
}

#[async_trait]
impl TransactionSource for Repository {
    async fn fetch_transactions(&self, range: &DateRange) -> Result<Vec<Transaction>, SourceError> {
        Ok(self.query_transactions(range, None).await?)
    }

    async fn fetch_expenses(&self, range: &DateRange) -> Result<Vec<Expense>, SourceError> {
        Ok(self.query_expenses(range, None).await?)
    }
}
