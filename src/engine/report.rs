//! Report table, daily series, status distribution and category drill-down.
//!
//! All of these derive their numbers from [`ProfitBreakdown`] and
//! [`ProfitAccumulator`] so every view agrees with the summary totals.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::accumulator::{ProfitAccumulator, ProfitSummary};
use super::breakdown::ProfitBreakdown;
use crate::domain::{Decimal, FundStatus, RecordId, TimeMs, Transaction};

/// One line of the report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: RecordId,
    pub customer_name: String,
    pub currency: String,
    pub date: TimeMs,
    pub fund_status: FundStatus,
    pub deposit_amount: Decimal,
    pub exchange_rate: Decimal,
    pub breakdown: ProfitBreakdown,
}

impl ReportRow {
    pub fn of(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            customer_name: tx.customer_name.clone(),
            currency: tx.currency.clone(),
            date: tx.effective_date(),
            fund_status: tx.fund_status,
            deposit_amount: tx.deposit_amount,
            exchange_rate: tx.exchange_rate,
            breakdown: ProfitBreakdown::of(tx),
        }
    }
}

/// Rows sorted newest first, ties broken by id.
pub fn report_rows(transactions: &[Transaction]) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = transactions.iter().map(ReportRow::of).collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyProfit {
    pub date: NaiveDate,
    pub profit: Decimal,
    pub estimated_profit: Decimal,
    pub completed_count: u64,
    pub estimated_count: u64,
}

/// Actual and estimated profit per local calendar day, oldest first.
///
/// Days holding only returned transactions are omitted.
pub fn daily_profit(transactions: &[Transaction], offset: FixedOffset) -> Vec<DailyProfit> {
    let mut by_day: BTreeMap<NaiveDate, ProfitAccumulator> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| !t.fund_status.is_returned()) {
        by_day
            .entry(tx.effective_date().local_date(offset))
            .or_default()
            .push(tx);
    }

    by_day
        .into_iter()
        .map(|(date, acc)| {
            let s: ProfitSummary = acc.finish();
            DailyProfit {
                date,
                profit: s.profit,
                estimated_profit: s.estimated_profit,
                completed_count: s.completed_count,
                estimated_count: s.estimated_count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub fund_status: FundStatus,
    pub count: u64,
    pub deposit_amount: Decimal,
    pub initial_usdt: Decimal,
}

/// Count and deposit totals for every status, returned included, in workflow order.
pub fn status_breakdown(transactions: &[Transaction]) -> Vec<StatusCount> {
    FundStatus::ALL
        .into_iter()
        .map(|status| {
            let matching = transactions.iter().filter(|t| t.fund_status == status);
            let mut count = 0u64;
            let mut deposit_amount = Decimal::zero();
            let mut initial_usdt = Decimal::zero();
            for tx in matching {
                count += 1;
                deposit_amount = deposit_amount.saturating_add(tx.deposit_amount);
                initial_usdt = initial_usdt.saturating_add(super::conversion::initial_usdt(tx));
            }
            StatusCount {
                fund_status: status,
                count,
                deposit_amount,
                initial_usdt,
            }
        })
        .collect()
}

/// Profit category selectable in the drill-down view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitCategory {
    Commission,
    Fee,
    Exchange,
    Penalty,
}

impl FromStr for ProfitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commission" => Ok(ProfitCategory::Commission),
            "fee" | "transferfee" => Ok(ProfitCategory::Fee),
            "exchange" | "exchangerateprofit" => Ok(ProfitCategory::Exchange),
            "penalty" | "violationpenalty" => Ok(ProfitCategory::Penalty),
            other => Err(format!("unknown profit category: {}", other)),
        }
    }
}

/// Realized figures or projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    #[default]
    Actual,
    Estimated,
}

impl FromStr for Basis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "actual" => Ok(Basis::Actual),
            "estimated" => Ok(Basis::Estimated),
            other => Err(format!("unknown basis: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillDownRow {
    pub id: RecordId,
    pub customer_name: String,
    pub date: TimeMs,
    pub fund_status: FundStatus,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillDown {
    pub category: ProfitCategory,
    pub basis: Basis,
    pub total: Decimal,
    pub rows: Vec<DrillDownRow>,
}

/// Transactions contributing to one summary category, with their amounts.
///
/// `total` equals the matching [`ProfitSummary`] field for the same input.
pub fn drill_down(transactions: &[Transaction], category: ProfitCategory, basis: Basis) -> DrillDown {
    let mut rows: Vec<DrillDownRow> = transactions
        .iter()
        .filter(|tx| !tx.fund_status.is_returned())
        .filter(|tx| {
            category == ProfitCategory::Penalty
                || basis == Basis::Estimated
                || tx.fund_status.is_completed()
        })
        .map(|tx| {
            let b = ProfitBreakdown::of(tx);
            let amount = match (category, basis) {
                (ProfitCategory::Commission, _) => b.commission_usdt,
                (ProfitCategory::Fee, _) => b.fee_usdt,
                (ProfitCategory::Exchange, Basis::Actual) => b.exchange_profit,
                (ProfitCategory::Exchange, Basis::Estimated) => b.estimated_exchange_profit,
                (ProfitCategory::Penalty, _) => b.penalty_usdt,
            };
            DrillDownRow {
                id: tx.id.clone(),
                customer_name: tx.customer_name.clone(),
                date: tx.effective_date(),
                fund_status: tx.fund_status,
                amount,
            }
        })
        .filter(|row| !row.amount.is_zero())
        .collect();

    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    let total = rows.iter().map(|r| r.amount).sum();

    DrillDown {
        category,
        basis,
        total,
        rows,
    }
}
