pub mod alerts;
pub mod dto;
pub mod expenses;
pub mod health;
pub mod report;
pub mod summary;
pub mod transactions;

use crate::config::Config;
use crate::db::Repository;
use crate::domain::TimeMs;
use crate::engine::{DateRange, Period};
use crate::error::AppError;
use crate::services::{Ledger, Reporting};
use axum::{
    routing::{get, patch, put},
    Router,
};
use chrono::FixedOffset;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repo: Arc<Repository>,
    pub ledger: Ledger,
    pub reporting: Reporting,
}

impl AppState {
    /// Wire the ledger and reporting services over one repository.
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        let reporting = Reporting::new(repo.clone(), config.utc_offset());
        Self {
            ledger: Ledger::new(repo.clone()),
            reporting,
            repo,
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/v1/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/v1/transactions/:id",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
        .route(
            "/v1/transactions/:id/status",
            patch(transactions::update_status),
        )
        .route(
            "/v1/transactions/:id/acceptance",
            patch(transactions::update_acceptance),
        )
        .route(
            "/v1/transactions/:id/profit",
            get(transactions::get_transaction_profit),
        )
        .route("/v1/summary", get(summary::get_summary))
        .route("/v1/report", get(report::get_report))
        .route("/v1/report/daily", get(report::get_daily))
        .route("/v1/report/drilldown", get(report::get_drill_down))
        .route("/v1/alerts/maintenance", get(alerts::get_maintenance_alerts))
        .route(
            "/v1/expenses",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route("/v1/expenses/summary", get(expenses::get_expense_summary))
        .route(
            "/v1/expenses/:id",
            put(expenses::update_expense).delete(expenses::delete_expense),
        )
        .layer(cors)
        .with_state(state)
}

/// Turn `period` / `fromMs` / `toMs` query values into a range.
///
/// Explicit bounds win over a period preset.
pub(crate) fn resolve_window(
    period: Option<&str>,
    from_ms: Option<i64>,
    to_ms: Option<i64>,
    offset: FixedOffset,
) -> Result<DateRange, AppError> {
    let from = from_ms.map(TimeMs::new);
    let to = to_ms.map(TimeMs::new);

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::BadRequest("fromMs must be <= toMs".to_string()));
        }
    }

    if from.is_some() || to.is_some() {
        return Ok(DateRange::new(from, to));
    }

    let period = period
        .unwrap_or("all")
        .parse::<Period>()
        .map_err(AppError::BadRequest)?;
    Ok(period.resolve(TimeMs::now(), offset))
}
