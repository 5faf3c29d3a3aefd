//! Write-time normalization of a transaction.
//!
//! Status overrides and derived fields are settled here, once, before a record
//! is stored. Readers of stored records can then rely on them without
//! re-checking the status.

use super::breakdown::theoretical_settlement_usdt;
use crate::domain::{Decimal, Transaction};

/// Apply status overrides and compute `settlement_usdt` and `maintenance_end_date`.
pub fn prepare_for_save(mut tx: Transaction) -> Transaction {
    if tx.fund_status.waives_charges() {
        tx.commission_percentage = Decimal::zero();
        tx.transfer_fee = Decimal::zero();
    }

    tx.settlement_usdt = theoretical_settlement_usdt(&tx);

    if tx.fund_status.is_returned() {
        tx.settlement_usdt = Decimal::zero();
        tx.acceptance_usdt = Decimal::zero();
    }

    tx.maintenance_end_date = match tx.deposit_date {
        Some(start) if tx.maintenance_days > 0 => Some(start.plus_days(tx.maintenance_days)),
        _ => None,
    };

    tx
}
