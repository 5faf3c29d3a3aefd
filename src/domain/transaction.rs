//! Customer deposit transaction.

use crate::domain::decimal::lenient;
use crate::domain::{Decimal, FundStatus, RecordId, TimeMs};
use serde::{Deserialize, Serialize};

/// A customer deposit awaiting or having completed USDT settlement.
///
/// Numeric fields are already coerced: anything missing or non-numeric in the
/// original input is stored as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub customer_name: String,
    /// Native currency code of the deposit (e.g. "MYR").
    pub currency: String,
    /// Native-currency amount the customer deposited.
    pub deposit_amount: Decimal,
    /// Native units per 1 USDT.
    pub exchange_rate: Decimal,
    /// Percentage of `deposit_amount` kept as commission.
    pub commission_percentage: Decimal,
    /// Flat native-currency fee.
    pub transfer_fee: Decimal,
    /// USDT-denominated penalty.
    pub violation_penalty: Decimal,
    /// USDT actually received from the counter-party; zero until known.
    pub acceptance_usdt: Decimal,
    /// Theoretical settlement, computed when saved.
    pub settlement_usdt: Decimal,
    pub fund_status: FundStatus,
    /// Length of the maintenance period in days, zero for none.
    pub maintenance_days: i64,
    pub created_date: TimeMs,
    pub deposit_date: Option<TimeMs>,
    /// Computed when saved from `deposit_date + maintenance_days`.
    pub maintenance_end_date: Option<TimeMs>,
    pub remarks: Option<String>,
}

impl Transaction {
    /// The date that places this transaction in a reporting window.
    pub fn effective_date(&self) -> TimeMs {
        self.deposit_date.unwrap_or(self.created_date)
    }
}

/// Transaction fields as entered by an operator or an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionInput {
    pub customer_name: Option<String>,
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub deposit_amount: Decimal,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub exchange_rate: Decimal,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub commission_percentage: Decimal,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub transfer_fee: Decimal,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub violation_penalty: Decimal,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub acceptance_usdt: Decimal,
    pub fund_status: Option<FundStatus>,
    pub maintenance_days: Option<i64>,
    pub deposit_date: Option<i64>,
    pub remarks: Option<String>,
}

impl TransactionInput {
    /// Build an unsaved transaction. Derived fields are left for the save path.
    pub fn into_transaction(self, id: RecordId, created_date: TimeMs) -> Transaction {
        Transaction {
            id,
            customer_name: self.customer_name.unwrap_or_default().trim().to_string(),
            currency: self
                .currency
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_default(),
            deposit_amount: self.deposit_amount,
            exchange_rate: self.exchange_rate,
            commission_percentage: self.commission_percentage,
            transfer_fee: self.transfer_fee,
            violation_penalty: self.violation_penalty,
            acceptance_usdt: self.acceptance_usdt,
            settlement_usdt: Decimal::zero(),
            fund_status: self.fund_status.unwrap_or_default(),
            maintenance_days: self.maintenance_days.unwrap_or(0).max(0),
            created_date,
            deposit_date: self.deposit_date.map(TimeMs::new),
            maintenance_end_date: None,
            remarks: self
                .remarks
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        }
    }
}
