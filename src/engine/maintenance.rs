//! Maintenance-period alerts. These never feed into profit figures.

use crate::domain::{FundStatus, RecordId, TimeMs, Transaction};

const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceAlert {
    pub id: RecordId,
    pub customer_name: String,
    pub fund_status: FundStatus,
    pub maintenance_end_date: TimeMs,
    /// Whole days until the end date, rounded down; negative once passed.
    pub days_remaining: i64,
    pub overdue: bool,
}

/// Open transactions whose maintenance period ends within `within_days` of `now`
/// or has already ended, soonest first.
pub fn maintenance_alerts(
    transactions: &[Transaction],
    now: TimeMs,
    within_days: i64,
) -> Vec<MaintenanceAlert> {
    let horizon = now.plus_days(within_days.max(0));

    let mut alerts: Vec<MaintenanceAlert> = transactions
        .iter()
        .filter(|tx| !tx.fund_status.is_completed() && !tx.fund_status.is_returned())
        .filter_map(|tx| {
            let end = tx.maintenance_end_date?;
            if end > horizon {
                return None;
            }
            let diff = end.as_ms().saturating_sub(now.as_ms());
            Some(MaintenanceAlert {
                id: tx.id.clone(),
                customer_name: tx.customer_name.clone(),
                fund_status: tx.fund_status,
                maintenance_end_date: end,
                days_remaining: diff.div_euclid(MS_PER_DAY),
                overdue: end < now,
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        a.maintenance_end_date
            .cmp(&b.maintenance_end_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    alerts
}
