//! Native-currency to USDT conversion primitives.
//!
//! Every function here is total: a non-positive exchange rate or an arithmetic
//! overflow yields zero instead of an error.

use crate::domain::{Decimal, Transaction};

/// Convert a native-currency amount to USDT at `exchange_rate` native per USDT.
pub fn to_usdt(native_amount: Decimal, exchange_rate: Decimal) -> Decimal {
    if !exchange_rate.is_positive() {
        return Decimal::zero();
    }
    native_amount
        .checked_div(exchange_rate)
        .unwrap_or_default()
}

/// Face value of the deposit in USDT before any fee, commission or spread.
pub fn initial_usdt(tx: &Transaction) -> Decimal {
    to_usdt(tx.deposit_amount, tx.exchange_rate)
}

/// Commission in native currency: `deposit_amount * commission_percentage / 100`.
pub fn commission_native(tx: &Transaction) -> Decimal {
    tx.deposit_amount
        .checked_mul(tx.commission_percentage)
        .and_then(|v| v.checked_div(Decimal::hundred()))
        .unwrap_or_default()
}

/// Deposit left after the transfer fee and commission, in native currency.
pub fn net_native(tx: &Transaction) -> Decimal {
    tx.deposit_amount
        .checked_sub(tx.transfer_fee)
        .and_then(|v| v.checked_sub(commission_native(tx)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordId, TimeMs, TransactionInput};

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn tx(deposit: &str, rate: &str, pct: &str, fee: &str) -> Transaction {
        TransactionInput {
            deposit_amount: d(deposit),
            exchange_rate: d(rate),
            commission_percentage: d(pct),
            transfer_fee: d(fee),
            ..Default::default()
        }
        .into_transaction(RecordId::new("t".into()), TimeMs::new(0))
    }

    #[test]
    fn to_usdt_divides_by_rate() {
        assert_eq!(to_usdt(d("470"), d("4.7")), d("100"));
    }

    #[test]
    fn to_usdt_zero_or_negative_rate_is_zero() {
        assert_eq!(to_usdt(d("470"), Decimal::zero()), Decimal::zero());
        assert_eq!(to_usdt(d("470"), d("-4.7")), Decimal::zero());
    }

    #[test]
    fn commission_and_net() {
        let t = tx("1000", "4", "10", "25");
        assert_eq!(commission_native(&t), d("100"));
        assert_eq!(net_native(&t), d("875"));
        assert_eq!(initial_usdt(&t), d("250"));
    }

    #[test]
    fn overflow_degrades_to_zero() {
        let huge = Decimal::new(rust_decimal::Decimal::MAX);
        let t = tx("0", "1", "0", "0");
        let t = Transaction {
            deposit_amount: huge,
            commission_percentage: huge,
            ..t
        };
        assert_eq!(commission_native(&t), Decimal::zero());
        assert_eq!(to_usdt(huge, d("0.0000001")), Decimal::zero());
    }
}
