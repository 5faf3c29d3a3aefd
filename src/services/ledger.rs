//! Write path for transactions and expenses.

use crate::db::Repository;
use crate::domain::{
    Decimal, Expense, ExpenseInput, FundStatus, RecordId, TimeMs, Transaction, TransactionInput,
};
use crate::engine::{prepare_for_save, DateRange};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction not found: {0}")]
    NotFound(RecordId),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(RecordId),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Records and edits transactions. Every write goes through
/// [`prepare_for_save`], so stored records always carry their status overrides
/// and derived fields.
#[derive(Clone)]
pub struct Ledger {
    repo: Arc<Repository>,
}

impl Ledger {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn record(&self, input: TransactionInput) -> Result<Transaction, LedgerError> {
        let tx = prepare_for_save(input.into_transaction(RecordId::generate(), TimeMs::now()));
        self.repo.insert_transaction(&tx).await?;
        info!(
            "Recorded transaction {} ({}, {} {})",
            tx.id, tx.fund_status, tx.deposit_amount, tx.currency
        );
        Ok(tx)
    }

    pub async fn get(&self, id: &RecordId) -> Result<Transaction, LedgerError> {
        self.repo
            .get_transaction(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    /// Replace a transaction's editable fields, keeping its id and creation date.
    pub async fn amend(
        &self,
        id: &RecordId,
        input: TransactionInput,
    ) -> Result<Transaction, LedgerError> {
        let existing = self.get(id).await?;
        let tx = prepare_for_save(input.into_transaction(existing.id, existing.created_date));
        self.save(tx).await
    }

    /// Move a transaction to another status. Any transition is allowed.
    pub async fn transition_status(
        &self,
        id: &RecordId,
        status: FundStatus,
    ) -> Result<Transaction, LedgerError> {
        let mut tx = self.get(id).await?;
        let previous = tx.fund_status;
        tx.fund_status = status;
        let tx = self.save(prepare_for_save(tx)).await?;
        info!("Transaction {} status {} -> {}", id, previous, status);
        Ok(tx)
    }

    /// Fill in the USDT actually received from the counter-party.
    pub async fn record_acceptance(
        &self,
        id: &RecordId,
        acceptance_usdt: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let mut tx = self.get(id).await?;
        tx.acceptance_usdt = acceptance_usdt;
        self.save(prepare_for_save(tx)).await
    }

    /// Transactions dated within `range`, newest first.
    pub async fn list(
        &self,
        range: &DateRange,
        status: Option<FundStatus>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.repo.query_transactions(range, status).await?)
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), LedgerError> {
        if !self.repo.delete_transaction(id).await? {
            return Err(LedgerError::NotFound(id.clone()));
        }
        info!("Deleted transaction {}", id);
        Ok(())
    }

    async fn save(&self, tx: Transaction) -> Result<Transaction, LedgerError> {
        if !self.repo.update_transaction(&tx).await? {
            return Err(LedgerError::NotFound(tx.id));
        }
        Ok(tx)
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    pub async fn record_expense(&self, input: ExpenseInput) -> Result<Expense, LedgerError> {
        let expense = input.into_expense(RecordId::generate(), TimeMs::now());
        self.repo.insert_expense(&expense).await?;
        info!(
            "Recorded expense {} ({} {})",
            expense.id, expense.amount, expense.category
        );
        Ok(expense)
    }

    pub async fn amend_expense(
        &self,
        id: &RecordId,
        input: ExpenseInput,
    ) -> Result<Expense, LedgerError> {
        let existing = self
            .repo
            .get_expense(id)
            .await?
            .ok_or_else(|| LedgerError::ExpenseNotFound(id.clone()))?;
        let input = ExpenseInput {
            spent_at: input.spent_at.or(Some(existing.spent_at.as_ms())),
            ..input
        };
        let expense = input.into_expense(existing.id, existing.created_date);
        if !self.repo.update_expense(&expense).await? {
            return Err(LedgerError::ExpenseNotFound(expense.id));
        }
        Ok(expense)
    }

    pub async fn list_expenses(
        &self,
        range: &DateRange,
        category: Option<&str>,
    ) -> Result<Vec<Expense>, LedgerError> {
        Ok(self.repo.query_expenses(range, category).await?)
    }

    pub async fn delete_expense(&self, id: &RecordId) -> Result<(), LedgerError> {
        if !self.repo.delete_expense(id).await? {
            return Err(LedgerError::ExpenseNotFound(id.clone()));
        }
        Ok(())
    }
}
