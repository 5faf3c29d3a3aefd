pub mod ledger;
pub mod reporting;

pub use ledger::{Ledger, LedgerError};
pub use reporting::{Dashboard, Report, Reporting};
