//! Aggregate profit accumulator.
//!
//! Folds a transaction snapshot into realized ("actual") and projected
//! ("estimated") totals plus the value of frozen-unprocessable funds. The fold
//! is a pure sum, so input order never matters.

use super::breakdown::ProfitBreakdown;
use crate::domain::{Decimal, Transaction};

/// Profit totals over a set of transactions, all in USDT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfitSummary {
    pub commission: Decimal,
    pub transfer_fee: Decimal,
    pub exchange_rate_profit: Decimal,
    pub violation_penalty: Decimal,
    pub profit: Decimal,
    pub completed_count: u64,
    pub estimated_commission: Decimal,
    pub estimated_transfer_fee: Decimal,
    pub estimated_exchange_rate_profit: Decimal,
    pub estimated_violation_penalty: Decimal,
    pub estimated_profit: Decimal,
    pub estimated_count: u64,
    pub frozen_funds: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct ProfitAccumulator {
    totals: ProfitSummary,
}

impl ProfitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one transaction. Returned transactions are skipped entirely.
    pub fn push(&mut self, tx: &Transaction) {
        if tx.fund_status.is_returned() {
            return;
        }

        let b = ProfitBreakdown::of(tx);
        let t = &mut self.totals;

        t.violation_penalty = t.violation_penalty.saturating_add(b.penalty_usdt);
        t.estimated_violation_penalty = t.estimated_violation_penalty.saturating_add(b.penalty_usdt);

        if tx.fund_status.is_completed() {
            t.commission = t.commission.saturating_add(b.commission_usdt);
            t.transfer_fee = t.transfer_fee.saturating_add(b.fee_usdt);
            t.exchange_rate_profit = t.exchange_rate_profit.saturating_add(b.exchange_profit);
            t.completed_count += 1;
        }

        t.estimated_commission = t.estimated_commission.saturating_add(b.commission_usdt);
        t.estimated_transfer_fee = t.estimated_transfer_fee.saturating_add(b.fee_usdt);
        t.estimated_exchange_rate_profit = t
            .estimated_exchange_rate_profit
            .saturating_add(b.estimated_exchange_profit);
        t.estimated_count += 1;

        if tx.fund_status.is_frozen_unprocessable() {
            t.frozen_funds = t.frozen_funds.saturating_add(b.initial_usdt);
        }
    }

    pub fn finish(self) -> ProfitSummary {
        let mut t = self.totals;
        t.profit = [t.commission, t.transfer_fee, t.exchange_rate_profit, t.violation_penalty]
            .into_iter()
            .sum();
        t.estimated_profit = [
            t.estimated_commission,
            t.estimated_transfer_fee,
            t.estimated_exchange_rate_profit,
            t.estimated_violation_penalty,
        ]
        .into_iter()
        .sum();
        t
    }
}

/// Summarize a transaction snapshot.
pub fn summarize<'a, I>(transactions: I) -> ProfitSummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut acc = ProfitAccumulator::new();
    for tx in transactions {
        acc.push(tx);
    }
    acc.finish()
}
