//! Personal expense entry.

use crate::domain::decimal::lenient;
use crate::domain::{Decimal, RecordId, TimeMs};
use serde::{Deserialize, Serialize};

/// Category used when none is given.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "其他";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: RecordId,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub spent_at: TimeMs,
    pub created_date: TimeMs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseInput {
    #[serde(deserialize_with = "lenient::deserialize")]
    pub amount: Decimal,
    pub category: Option<String>,
    pub description: Option<String>,
    pub spent_at: Option<i64>,
}

impl ExpenseInput {
    /// Build an expense; `spent_at` defaults to the creation time.
    pub fn into_expense(self, id: RecordId, created_date: TimeMs) -> Expense {
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_EXPENSE_CATEGORY.to_string());

        Expense {
            id,
            amount: self.amount,
            category,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            spent_at: self.spent_at.map(TimeMs::new).unwrap_or(created_date),
            created_date,
        }
    }
}
