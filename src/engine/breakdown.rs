//! Per-transaction profit decomposition in USDT.

use super::conversion::{commission_native, initial_usdt, net_native, to_usdt};
use crate::domain::{Decimal, FundStatus, Transaction};

/// One transaction's contribution to each profit category, in USDT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfitBreakdown {
    pub fund_status: FundStatus,
    pub commission_usdt: Decimal,
    pub fee_usdt: Decimal,
    pub initial_usdt: Decimal,
    pub theoretical_settlement_usdt: Decimal,
    /// Acceptance if recorded, otherwise the theoretical settlement.
    pub actual_acceptance: Decimal,
    /// `actual_acceptance - initial_usdt`; negative on a loss.
    pub exchange_profit: Decimal,
    pub penalty_usdt: Decimal,
    /// Realized profit: the full sum when completed, the penalty alone otherwise,
    /// zero when returned.
    pub total_profit: Decimal,
    /// Acceptance under the projection rule, see [`estimated_acceptance`].
    pub estimated_acceptance: Decimal,
    pub estimated_exchange_profit: Decimal,
    /// Projected profit, zero when returned.
    pub estimated_total: Decimal,
}

impl ProfitBreakdown {
    pub fn of(tx: &Transaction) -> Self {
        let commission_usdt = to_usdt(commission_native(tx), tx.exchange_rate);
        let fee_usdt = to_usdt(tx.transfer_fee, tx.exchange_rate);
        let initial = initial_usdt(tx);
        let theoretical = theoretical_settlement_usdt(tx);

        let actual_acceptance = if tx.acceptance_usdt.is_positive() {
            tx.acceptance_usdt
        } else {
            theoretical
        };
        let exchange_profit = actual_acceptance.saturating_sub(initial);
        let penalty_usdt = tx.violation_penalty;

        let estimated_acceptance = estimated_acceptance(tx);
        let estimated_exchange_profit = estimated_acceptance.saturating_sub(initial);

        let total_profit = match tx.fund_status {
            FundStatus::Returned => Decimal::zero(),
            FundStatus::Completed => {
                [commission_usdt, fee_usdt, exchange_profit, penalty_usdt]
                    .into_iter()
                    .sum()
            }
            _ => penalty_usdt,
        };
        let estimated_total = if tx.fund_status.is_returned() {
            Decimal::zero()
        } else {
            [commission_usdt, fee_usdt, estimated_exchange_profit, penalty_usdt]
                .into_iter()
                .sum()
        };

        Self {
            fund_status: tx.fund_status,
            commission_usdt,
            fee_usdt,
            initial_usdt: initial,
            theoretical_settlement_usdt: theoretical,
            actual_acceptance,
            exchange_profit,
            penalty_usdt,
            total_profit,
            estimated_acceptance,
            estimated_exchange_profit,
            estimated_total,
        }
    }
}

/// Net deposit in USDT; always zero for frozen-unprocessable funds.
pub fn theoretical_settlement_usdt(tx: &Transaction) -> Decimal {
    if tx.fund_status.is_frozen_unprocessable() {
        return Decimal::zero();
    }
    to_usdt(net_native(tx), tx.exchange_rate)
}

/// Acceptance used for projections.
///
/// Falls back to settlement plus commission plus fee, unlike the realized
/// figure which falls back to settlement alone. Both rules are kept as
/// operators have always seen them.
pub fn estimated_acceptance(tx: &Transaction) -> Decimal {
    if tx.acceptance_usdt.is_positive() {
        return tx.acceptance_usdt;
    }
    [
        theoretical_settlement_usdt(tx),
        to_usdt(commission_native(tx), tx.exchange_rate),
        to_usdt(tx.transfer_fee, tx.exchange_rate),
    ]
    .into_iter()
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordId, TimeMs, TransactionInput};

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn scenario_a(status: FundStatus) -> Transaction {
        TransactionInput {
            deposit_amount: d("1000"),
            exchange_rate: d("1.0"),
            commission_percentage: d("10"),
            transfer_fee: d("25"),
            acceptance_usdt: d("950"),
            fund_status: Some(status),
            ..Default::default()
        }
        .into_transaction(RecordId::new("a".into()), TimeMs::new(0))
    }

    #[test]
    fn completed_transaction_full_breakdown() {
        let b = ProfitBreakdown::of(&scenario_a(FundStatus::Completed));
        assert_eq!(b.commission_usdt, d("100"));
        assert_eq!(b.fee_usdt, d("25"));
        assert_eq!(b.initial_usdt, d("1000"));
        assert_eq!(b.theoretical_settlement_usdt, d("875"));
        assert_eq!(b.actual_acceptance, d("950"));
        assert_eq!(b.exchange_profit, d("-50"));
        assert_eq!(b.total_profit, d("75"));
        assert_eq!(b.estimated_total, d("75"));
    }

    #[test]
    fn pending_counts_penalty_only() {
        let mut tx = scenario_a(FundStatus::Pending);
        tx.violation_penalty = d("12");
        let b = ProfitBreakdown::of(&tx);
        assert_eq!(b.total_profit, d("12"));
        assert_eq!(b.estimated_total, d("87"));
    }

    #[test]
    fn returned_contributes_nothing() {
        let mut tx = scenario_a(FundStatus::Returned);
        tx.violation_penalty = d("12");
        let b = ProfitBreakdown::of(&tx);
        assert_eq!(b.total_profit, Decimal::zero());
        assert_eq!(b.estimated_total, Decimal::zero());
    }

    #[test]
    fn actual_fallback_uses_settlement_only() {
        let mut tx = scenario_a(FundStatus::Completed);
        tx.acceptance_usdt = Decimal::zero();
        let b = ProfitBreakdown::of(&tx);
        assert_eq!(b.actual_acceptance, d("875"));
        assert_eq!(b.exchange_profit, d("-125"));
        assert_eq!(b.total_profit, Decimal::zero());
    }

    #[test]
    fn estimated_fallback_adds_back_charges() {
        let mut tx = scenario_a(FundStatus::Accepting);
        tx.acceptance_usdt = Decimal::zero();
        assert_eq!(estimated_acceptance(&tx), d("1000"));
        let b = ProfitBreakdown::of(&tx);
        assert_eq!(b.estimated_exchange_profit, Decimal::zero());
        assert_eq!(b.estimated_total, d("125"));
    }

    #[test]
    fn zero_rate_zeroes_conversions() {
        let mut tx = scenario_a(FundStatus::Completed);
        tx.exchange_rate = Decimal::zero();
        tx.deposit_amount = d("5000");
        tx.acceptance_usdt = Decimal::zero();
        tx.violation_penalty = d("3");
        let b = ProfitBreakdown::of(&tx);
        assert!(b.commission_usdt.is_zero());
        assert!(b.fee_usdt.is_zero());
        assert!(b.theoretical_settlement_usdt.is_zero());
        assert!(b.exchange_profit.is_zero());
        assert_eq!(b.total_profit, d("3"));
    }

    #[test]
    fn frozen_unprocessable_has_no_settlement() {
        let tx = scenario_a(FundStatus::FrozenUnprocessable);
        assert_eq!(theoretical_settlement_usdt(&tx), Decimal::zero());
        assert_eq!(ProfitBreakdown::of(&tx).theoretical_settlement_usdt, Decimal::zero());
    }

    #[test]
    fn range_limit_amounts_clamp_instead_of_panicking() {
        let max = Decimal::new(rust_decimal::Decimal::MAX);

        let mut tx = scenario_a(FundStatus::Completed);
        tx.violation_penalty = max;
        let b = ProfitBreakdown::of(&tx);
        assert_eq!(b.total_profit, max);
        assert_eq!(b.estimated_total, max);

        let mut tx = scenario_a(FundStatus::Completed);
        tx.deposit_amount = -max;
        tx.acceptance_usdt = max;
        let b = ProfitBreakdown::of(&tx);
        assert_eq!(b.initial_usdt, -max);
        assert_eq!(b.exchange_profit, max);
        assert_eq!(b.estimated_exchange_profit, max);
    }
}
