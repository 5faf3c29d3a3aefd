//! Read path: fetch a snapshot from the source, hand it to the engine.

use chrono::FixedOffset;
use std::sync::Arc;
use tracing::debug;

use crate::domain::TimeMs;
use crate::engine::{
    self, Basis, DailyProfit, DateRange, DrillDown, ExpenseSummary, MaintenanceAlert,
    ProfitCategory, ProfitSummary, ReportRow, StatusCount,
};
use crate::source::{SourceError, TransactionSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub range: DateRange,
    pub transaction_count: usize,
    pub summary: ProfitSummary,
    pub statuses: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub range: DateRange,
    pub rows: Vec<ReportRow>,
    pub totals: ProfitSummary,
}

#[derive(Clone)]
pub struct Reporting {
    source: Arc<dyn TransactionSource>,
    offset: FixedOffset,
}

impl Reporting {
    pub fn new(source: Arc<dyn TransactionSource>, offset: FixedOffset) -> Self {
        Self { source, offset }
    }

    pub async fn dashboard(&self, range: DateRange) -> Result<Dashboard, SourceError> {
        let txs = self.source.fetch_transactions(&range).await?;
        debug!("Dashboard over {} transactions", txs.len());
        Ok(Dashboard {
            range,
            transaction_count: txs.len(),
            summary: engine::summarize(&txs),
            statuses: engine::status_breakdown(&txs),
        })
    }

    pub async fn report(&self, range: DateRange) -> Result<Report, SourceError> {
        let txs = self.source.fetch_transactions(&range).await?;
        Ok(Report {
            range,
            totals: engine::summarize(&txs),
            rows: engine::report_rows(&txs),
        })
    }

    pub async fn daily(&self, range: DateRange) -> Result<Vec<DailyProfit>, SourceError> {
        let txs = self.source.fetch_transactions(&range).await?;
        Ok(engine::daily_profit(&txs, self.offset))
    }

    pub async fn drill_down(
        &self,
        range: DateRange,
        category: ProfitCategory,
        basis: Basis,
    ) -> Result<DrillDown, SourceError> {
        let txs = self.source.fetch_transactions(&range).await?;
        Ok(engine::drill_down(&txs, category, basis))
    }

    pub async fn maintenance_alerts(
        &self,
        now: TimeMs,
        within_days: i64,
    ) -> Result<Vec<MaintenanceAlert>, SourceError> {
        let txs = self.source.fetch_transactions(&DateRange::all()).await?;
        Ok(engine::maintenance_alerts(&txs, now, within_days))
    }

    pub async fn expense_summary(&self, range: DateRange) -> Result<ExpenseSummary, SourceError> {
        let expenses = self.source.fetch_expenses(&range).await?;
        Ok(engine::summarize_expenses(&expenses))
    }
}
