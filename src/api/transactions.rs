use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::dto::{BreakdownDto, TransactionDto};
use crate::api::{resolve_window, AppState};
use crate::domain::decimal::lenient;
use crate::domain::{Decimal, FundStatus, RecordId, TransactionInput};
use crate::engine::ProfitBreakdown;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub period: Option<String>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub count: usize,
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub fund_status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceBody {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub acceptance_usdt: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitResponse {
    pub transaction: TransactionDto,
    pub profit: BreakdownDto,
}

fn parse_status(raw: &str) -> Result<FundStatus, AppError> {
    raw.parse::<FundStatus>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn list_transactions(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse>, AppError> {
    let range = resolve_window(
        params.period.as_deref(),
        params.from_ms,
        params.to_ms,
        state.config.utc_offset(),
    )?;
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_status)
        .transpose()?;

    let txs = state.ledger.list(&range, status).await?;
    Ok(Json(ListResponse {
        count: txs.len(),
        transactions: txs.into_iter().map(TransactionDto::from).collect(),
    }))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(input): Json<TransactionInput>,
) -> Result<(StatusCode, Json<TransactionDto>), AppError> {
    let tx = state.ledger.record(input).await?;
    Ok((StatusCode::CREATED, Json(tx.into())))
}

pub async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TransactionDto>, AppError> {
    let tx = state.ledger.get(&RecordId::new(id)).await?;
    Ok(Json(tx.into()))
}

pub async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<TransactionInput>,
) -> Result<Json<TransactionDto>, AppError> {
    let tx = state.ledger.amend(&RecordId::new(id), input).await?;
    Ok(Json(tx.into()))
}

pub async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.ledger.delete(&RecordId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<StatusBody>,
) -> Result<Json<TransactionDto>, AppError> {
    let status = parse_status(&body.fund_status)?;
    let tx = state
        .ledger
        .transition_status(&RecordId::new(id), status)
        .await?;
    Ok(Json(tx.into()))
}

pub async fn update_acceptance(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<AcceptanceBody>,
) -> Result<Json<TransactionDto>, AppError> {
    if body.acceptance_usdt.is_negative() {
        return Err(AppError::BadRequest(
            "acceptanceUsdt must not be negative".to_string(),
        ));
    }
    let tx = state
        .ledger
        .record_acceptance(&RecordId::new(id), body.acceptance_usdt)
        .await?;
    Ok(Json(tx.into()))
}

pub async fn get_transaction_profit(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProfitResponse>, AppError> {
    let tx = state.ledger.get(&RecordId::new(id)).await?;
    let profit = BreakdownDto::from(&ProfitBreakdown::of(&tx));
    Ok(Json(ProfitResponse {
        transaction: tx.into(),
        profit,
    }))
}
