use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::dto::{ExpenseDto, ExpenseSummaryDto};
use crate::api::summary::WindowQuery;
use crate::api::{resolve_window, AppState};
use crate::domain::{ExpenseInput, RecordId};
use crate::engine::DateRange;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub period: Option<String>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListResponse {
    pub count: usize,
    pub expenses: Vec<ExpenseDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryResponse {
    pub range: DateRange,
    #[serde(flatten)]
    pub summary: ExpenseSummaryDto,
}

fn validate(input: &ExpenseInput) -> Result<(), AppError> {
    if input.amount.is_negative() {
        return Err(AppError::BadRequest("amount must not be negative".to_string()));
    }
    Ok(())
}

pub async fn list_expenses(
    Query(params): Query<ExpenseListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let range = resolve_window(
        params.period.as_deref(),
        params.from_ms,
        params.to_ms,
        state.config.utc_offset(),
    )?;
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let expenses = state.ledger.list_expenses(&range, category).await?;
    Ok(Json(ExpenseListResponse {
        count: expenses.len(),
        expenses: expenses.into_iter().map(ExpenseDto::from).collect(),
    }))
}

pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<ExpenseInput>,
) -> Result<(StatusCode, Json<ExpenseDto>), AppError> {
    validate(&input)?;
    let expense = state.ledger.record_expense(input).await?;
    Ok((StatusCode::CREATED, Json(expense.into())))
}

pub async fn update_expense(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<ExpenseInput>,
) -> Result<Json<ExpenseDto>, AppError> {
    validate(&input)?;
    let expense = state.ledger.amend_expense(&RecordId::new(id), input).await?;
    Ok(Json(expense.into()))
}

pub async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.ledger.delete_expense(&RecordId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_expense_summary(
    Query(params): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<ExpenseSummaryResponse>, AppError> {
    let range = params.range(&state)?;
    let summary = state.reporting.expense_summary(range).await?;
    Ok(Json(ExpenseSummaryResponse {
        range,
        summary: ExpenseSummaryDto::from(&summary),
    }))
}
