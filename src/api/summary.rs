use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::dto::{StatusCountDto, SummaryDto};
use crate::api::{resolve_window, AppState};
use crate::engine::DateRange;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowQuery {
    pub period: Option<String>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
}

impl WindowQuery {
    pub(crate) fn range(&self, state: &AppState) -> Result<DateRange, AppError> {
        resolve_window(
            self.period.as_deref(),
            self.from_ms,
            self.to_ms,
            state.config.utc_offset(),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub range: DateRange,
    pub transaction_count: usize,
    pub summary: SummaryDto,
    pub statuses: Vec<StatusCountDto>,
}

pub async fn get_summary(
    Query(params): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let range = params.range(&state)?;
    let dashboard = state.reporting.dashboard(range).await?;

    Ok(Json(SummaryResponse {
        range: dashboard.range,
        transaction_count: dashboard.transaction_count,
        summary: SummaryDto::from(&dashboard.summary),
        statuses: dashboard.statuses.iter().map(StatusCountDto::from).collect(),
    }))
}
