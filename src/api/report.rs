use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::dto::{DailyProfitDto, DrillDownDto, ReportRowDto, SummaryDto};
use crate::api::summary::WindowQuery;
use crate::api::{resolve_window, AppState};
use crate::engine::{Basis, DateRange, ProfitCategory};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub range: DateRange,
    pub rows: Vec<ReportRowDto>,
    pub totals: SummaryDto,
}

pub async fn get_report(
    Query(params): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, AppError> {
    let report = state.reporting.report(params.range(&state)?).await?;
    Ok(Json(ReportResponse {
        range: report.range,
        rows: report.rows.iter().map(ReportRowDto::from).collect(),
        totals: SummaryDto::from(&report.totals),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    pub range: DateRange,
    pub days: Vec<DailyProfitDto>,
}

pub async fn get_daily(
    Query(params): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<DailyResponse>, AppError> {
    let range = params.range(&state)?;
    let days = state.reporting.daily(range).await?;
    Ok(Json(DailyResponse {
        range,
        days: days.iter().map(DailyProfitDto::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownQuery {
    pub category: String,
    pub basis: Option<String>,
    pub period: Option<String>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
}

pub async fn get_drill_down(
    Query(params): Query<DrillDownQuery>,
    State(state): State<AppState>,
) -> Result<Json<DrillDownDto>, AppError> {
    let category = params
        .category
        .parse::<ProfitCategory>()
        .map_err(AppError::BadRequest)?;
    let basis = params
        .basis
        .as_deref()
        .unwrap_or_default()
        .parse::<Basis>()
        .map_err(AppError::BadRequest)?;
    let range = resolve_window(
        params.period.as_deref(),
        params.from_ms,
        params.to_ms,
        state.config.utc_offset(),
    )?;

    let drill = state.reporting.drill_down(range, category, basis).await?;
    Ok(Json(DrillDownDto::from(&drill)))
}
