use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{FundStatus, TimeMs};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsQuery {
    pub within_days: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub id: String,
    pub customer_name: String,
    pub fund_status: FundStatus,
    pub maintenance_end_date: i64,
    pub days_remaining: i64,
    pub overdue: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsResponse {
    pub within_days: i64,
    pub alerts: Vec<AlertDto>,
}

pub async fn get_maintenance_alerts(
    Query(params): Query<AlertsQuery>,
    State(state): State<AppState>,
) -> Result<Json<AlertsResponse>, AppError> {
    let within_days = params
        .within_days
        .unwrap_or(state.config.maintenance_alert_days);
    if within_days < 0 {
        return Err(AppError::BadRequest(
            "withinDays must not be negative".to_string(),
        ));
    }

    let alerts = state
        .reporting
        .maintenance_alerts(TimeMs::now(), within_days)
        .await?;

    Ok(Json(AlertsResponse {
        within_days,
        alerts: alerts
            .into_iter()
            .map(|a| AlertDto {
                id: a.id.0,
                customer_name: a.customer_name,
                fund_status: a.fund_status,
                maintenance_end_date: a.maintenance_end_date.as_ms(),
                days_remaining: a.days_remaining,
                overdue: a.overdue,
            })
            .collect(),
    }))
}
