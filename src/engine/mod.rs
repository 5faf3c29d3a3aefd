//! Pure computation engine for settlement profit.
//!
//! Nothing in here performs I/O or holds state between calls; callers pass in
//! a snapshot of records and an explicit window.

pub mod accumulator;
pub mod breakdown;
pub mod conversion;
pub mod expenses;
pub mod maintenance;
pub mod normalize;
pub mod report;
pub mod window;

pub use accumulator::{summarize, ProfitAccumulator, ProfitSummary};
pub use breakdown::{estimated_acceptance, theoretical_settlement_usdt, ProfitBreakdown};
pub use conversion::{initial_usdt, to_usdt};
pub use expenses::{summarize_expenses, CategoryTotal, ExpenseSummary};
pub use maintenance::{maintenance_alerts, MaintenanceAlert};
pub use normalize::prepare_for_save;
pub use report::{
    daily_profit, drill_down, report_rows, status_breakdown, Basis, DailyProfit, DrillDown,
    DrillDownRow, ProfitCategory, ReportRow, StatusCount,
};
pub use window::{DateRange, Period};
