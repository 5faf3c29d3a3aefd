//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `transactions.rs` - Deposit transaction records
//! - `expenses.rs` - Personal expense records

mod expenses;
mod transactions;

use crate::domain::Decimal;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::warn;

/// Repository for database operations.
#[derive(Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Round-trip a trivial query to confirm the database answers.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Read a decimal column stored as canonical text; unreadable values become zero.
fn decimal_column(row: &SqliteRow, column: &str) -> Decimal {
    let raw: String = row.get(column);
    Decimal::from_str_canonical(&raw).unwrap_or_else(|_| {
        warn!("Invalid decimal {:?} in column {}, using 0", raw, column);
        Decimal::zero()
    })
}
