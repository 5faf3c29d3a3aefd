//! Response bodies. Money goes out as canonical decimal strings.

use serde::Serialize;

use crate::domain::{Decimal, Expense, FundStatus, Transaction};
use crate::engine::{
    CategoryTotal, DailyProfit, DrillDown, DrillDownRow, ExpenseSummary, ProfitBreakdown,
    ProfitSummary, ReportRow, StatusCount,
};

/// Decimal places kept in responses.
const MONEY_DP: u32 = 8;

pub fn money(value: Decimal) -> String {
    value.to_rounded_string(MONEY_DP)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: String,
    pub customer_name: String,
    pub currency: String,
    pub deposit_amount: String,
    pub exchange_rate: String,
    pub commission_percentage: String,
    pub transfer_fee: String,
    pub violation_penalty: String,
    pub acceptance_usdt: String,
    pub settlement_usdt: String,
    pub fund_status: FundStatus,
    pub maintenance_days: i64,
    pub created_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_end_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl From<Transaction> for TransactionDto {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id.0,
            customer_name: tx.customer_name,
            currency: tx.currency,
            deposit_amount: tx.deposit_amount.to_canonical_string(),
            exchange_rate: tx.exchange_rate.to_canonical_string(),
            commission_percentage: tx.commission_percentage.to_canonical_string(),
            transfer_fee: tx.transfer_fee.to_canonical_string(),
            violation_penalty: tx.violation_penalty.to_canonical_string(),
            acceptance_usdt: tx.acceptance_usdt.to_canonical_string(),
            settlement_usdt: money(tx.settlement_usdt),
            fund_status: tx.fund_status,
            maintenance_days: tx.maintenance_days,
            created_date: tx.created_date.as_ms(),
            deposit_date: tx.deposit_date.map(|t| t.as_ms()),
            maintenance_end_date: tx.maintenance_end_date.map(|t| t.as_ms()),
            remarks: tx.remarks,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownDto {
    pub commission_usdt: String,
    pub fee_usdt: String,
    pub initial_usdt: String,
    pub theoretical_settlement_usdt: String,
    pub actual_acceptance: String,
    pub exchange_profit: String,
    pub penalty_usdt: String,
    pub total_profit: String,
    pub estimated_acceptance: String,
    pub estimated_exchange_profit: String,
    pub estimated_total: String,
}

impl From<&ProfitBreakdown> for BreakdownDto {
    fn from(b: &ProfitBreakdown) -> Self {
        Self {
            commission_usdt: money(b.commission_usdt),
            fee_usdt: money(b.fee_usdt),
            initial_usdt: money(b.initial_usdt),
            theoretical_settlement_usdt: money(b.theoretical_settlement_usdt),
            actual_acceptance: money(b.actual_acceptance),
            exchange_profit: money(b.exchange_profit),
            penalty_usdt: money(b.penalty_usdt),
            total_profit: money(b.total_profit),
            estimated_acceptance: money(b.estimated_acceptance),
            estimated_exchange_profit: money(b.estimated_exchange_profit),
            estimated_total: money(b.estimated_total),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub commission: String,
    pub transfer_fee: String,
    pub exchange_rate_profit: String,
    pub violation_penalty: String,
    pub profit: String,
    pub completed_count: u64,
    pub estimated_commission: String,
    pub estimated_transfer_fee: String,
    pub estimated_exchange_rate_profit: String,
    pub estimated_violation_penalty: String,
    pub estimated_profit: String,
    pub estimated_count: u64,
    pub frozen_funds: String,
}

impl From<&ProfitSummary> for SummaryDto {
    fn from(s: &ProfitSummary) -> Self {
        Self {
            commission: money(s.commission),
            transfer_fee: money(s.transfer_fee),
            exchange_rate_profit: money(s.exchange_rate_profit),
            violation_penalty: money(s.violation_penalty),
            profit: money(s.profit),
            completed_count: s.completed_count,
            estimated_commission: money(s.estimated_commission),
            estimated_transfer_fee: money(s.estimated_transfer_fee),
            estimated_exchange_rate_profit: money(s.estimated_exchange_rate_profit),
            estimated_violation_penalty: money(s.estimated_violation_penalty),
            estimated_profit: money(s.estimated_profit),
            estimated_count: s.estimated_count,
            frozen_funds: money(s.frozen_funds),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountDto {
    pub fund_status: FundStatus,
    pub count: u64,
    pub deposit_amount: String,
    pub initial_usdt: String,
}

impl From<&StatusCount> for StatusCountDto {
    fn from(c: &StatusCount) -> Self {
        Self {
            fund_status: c.fund_status,
            count: c.count,
            deposit_amount: c.deposit_amount.to_canonical_string(),
            initial_usdt: money(c.initial_usdt),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRowDto {
    pub id: String,
    pub customer_name: String,
    pub currency: String,
    pub date: i64,
    pub fund_status: FundStatus,
    pub deposit_amount: String,
    pub exchange_rate: String,
    #[serde(flatten)]
    pub breakdown: BreakdownDto,
}

impl From<&ReportRow> for ReportRowDto {
    fn from(r: &ReportRow) -> Self {
        Self {
            id: r.id.0.clone(),
            customer_name: r.customer_name.clone(),
            currency: r.currency.clone(),
            date: r.date.as_ms(),
            fund_status: r.fund_status,
            deposit_amount: r.deposit_amount.to_canonical_string(),
            exchange_rate: r.exchange_rate.to_canonical_string(),
            breakdown: BreakdownDto::from(&r.breakdown),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProfitDto {
    /// Local calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub profit: String,
    pub estimated_profit: String,
    pub completed_count: u64,
    pub estimated_count: u64,
}

impl From<&DailyProfit> for DailyProfitDto {
    fn from(d: &DailyProfit) -> Self {
        Self {
            date: d.date.format("%Y-%m-%d").to_string(),
            profit: money(d.profit),
            estimated_profit: money(d.estimated_profit),
            completed_count: d.completed_count,
            estimated_count: d.estimated_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownRowDto {
    pub id: String,
    pub customer_name: String,
    pub date: i64,
    pub fund_status: FundStatus,
    pub amount: String,
}

impl From<&DrillDownRow> for DrillDownRowDto {
    fn from(r: &DrillDownRow) -> Self {
        Self {
            id: r.id.0.clone(),
            customer_name: r.customer_name.clone(),
            date: r.date.as_ms(),
            fund_status: r.fund_status,
            amount: money(r.amount),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownDto {
    pub category: crate::engine::ProfitCategory,
    pub basis: crate::engine::Basis,
    pub total: String,
    pub rows: Vec<DrillDownRowDto>,
}

impl From<&DrillDown> for DrillDownDto {
    fn from(d: &DrillDown) -> Self {
        Self {
            category: d.category,
            basis: d.basis,
            total: money(d.total),
            rows: d.rows.iter().map(DrillDownRowDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: String,
    pub amount: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub spent_at: i64,
    pub created_date: i64,
}

impl From<Expense> for ExpenseDto {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id.0,
            amount: e.amount.to_canonical_string(),
            category: e.category,
            description: e.description,
            spent_at: e.spent_at.as_ms(),
            created_date: e.created_date.as_ms(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotalDto {
    pub category: String,
    pub amount: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryDto {
    pub total: String,
    pub count: u64,
    pub by_category: Vec<CategoryTotalDto>,
}

impl From<&ExpenseSummary> for ExpenseSummaryDto {
    fn from(s: &ExpenseSummary) -> Self {
        Self {
            total: s.total.to_canonical_string(),
            count: s.count,
            by_category: s
                .by_category
                .iter()
                .map(|c: &CategoryTotal| CategoryTotalDto {
                    category: c.category.clone(),
                    amount: c.amount.to_canonical_string(),
                    count: c.count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_rounds_to_eight_places() {
        let third = Decimal::from(1).checked_div(Decimal::from(3)).unwrap();
        assert_eq!(money(third), "0.33333333");
        assert_eq!(money(Decimal::from(-50)), "-50");
    }
}
