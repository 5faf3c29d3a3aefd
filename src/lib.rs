pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod services;
pub mod source;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{Decimal, Expense, FundStatus, RecordId, TimeMs, Transaction};
pub use engine::{DateRange, Period, ProfitBreakdown, ProfitSummary};
pub use error::AppError;
pub use services::{Ledger, Reporting};
pub use source::{MockTransactionSource, SourceError, TransactionSource};
