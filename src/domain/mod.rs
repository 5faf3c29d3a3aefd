//! Domain types for the settlement ledger.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper, with lenient input parsing
//! - Domain primitives: TimeMs, RecordId
//! - FundStatus workflow labels
//! - Transaction and Expense records with their input forms

pub mod decimal;
pub mod expense;
pub mod primitives;
pub mod status;
pub mod transaction;

pub use decimal::Decimal;
pub use expense::{Expense, ExpenseInput, DEFAULT_EXPENSE_CATEGORY};
pub use primitives::{RecordId, TimeMs};
pub use status::{FundStatus, UnknownStatus};
pub use transaction::{Transaction, TransactionInput};
