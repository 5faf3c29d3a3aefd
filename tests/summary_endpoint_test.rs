use axum::http::StatusCode;
use serde_json::{json, Value};
use settlement_ledger::api::{self, AppState};
use settlement_ledger::db::init_db;
use settlement_ledger::{Config, Repository, TimeMs};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

const DAY_MS: i64 = 86_400_000;

struct TestApp {
    app: axum::Router,
    _temp: TempDir,
}

fn test_config() -> Config {
    Config {
        port: 0,
        database_path: ":memory:".to_string(),
        utc_offset_hours: 0,
        maintenance_alert_days: 3,
    }
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");

    let repo = Arc::new(Repository::new(pool));
    let app = api::create_router(AppState::new(repo, test_config()));

    TestApp {
        app,
        _temp: temp_dir,
    }
}

async fn request(app: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn deposit(status: &str, deposit_date: i64) -> Value {
    json!({
        "customerName": "Ali",
        "currency": "MYR",
        "depositAmount": "1000",
        "exchangeRate": "1",
        "commissionPercentage": "10",
        "transferFee": "25",
        "acceptanceUsdt": "950",
        "fundStatus": status,
        "depositDate": deposit_date
    })
}

/// Completed (75 profit), returned (excluded), pending with a penalty.
async fn seed(app: &axum::Router) {
    let base = 1_710_000_000_000_i64;
    for body in [
        deposit("completed", base),
        deposit("returned", base + DAY_MS),
        {
            let mut p = deposit("pending", base + DAY_MS);
            p["violationPenalty"] = json!("20");
            p
        },
    ] {
        let (status, _) = request(app.clone(), "POST", "/v1/transactions", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_summary_totals() {
    let t = setup_test_app().await;
    seed(&t.app).await;

    let (status, body) = request(t.app.clone(), "GET", "/v1/summary", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["transactionCount"], 3);
    let s = &body["summary"];
    assert_eq!(s["profit"], "95");
    assert_eq!(s["commission"], "100");
    assert_eq!(s["violationPenalty"], "20");
    assert_eq!(s["completedCount"], 1);
    assert_eq!(s["estimatedCount"], 2);
    assert_eq!(s["estimatedProfit"], "170");
    assert_eq!(s["frozenFunds"], "0");

    let statuses = body["statuses"].as_array().unwrap();
    assert_eq!(statuses.len(), 8);
    let returned = statuses
        .iter()
        .find(|c| c["fundStatus"] == "已退回")
        .unwrap();
    assert_eq!(returned["count"], 1);
}

#[tokio::test]
async fn test_summary_window() {
    let t = setup_test_app().await;
    seed(&t.app).await;

    let from = 1_710_000_000_000_i64 + DAY_MS / 2;
    let (_, body) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/summary?fromMs={}", from),
        None,
    )
    .await;
    assert_eq!(body["transactionCount"], 2);
    assert_eq!(body["summary"]["profit"], "20");
    assert_eq!(body["summary"]["completedCount"], 0);

    let (status, _) = request(t.app.clone(), "GET", "/v1/summary?period=decade", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_rows_and_totals() {
    let t = setup_test_app().await;
    seed(&t.app).await;

    let (status, body) = request(t.app.clone(), "GET", "/v1/report", None).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(body["totals"]["profit"], "95");

    let completed = rows
        .iter()
        .find(|r| r["fundStatus"] == "已完成交易")
        .unwrap();
    assert_eq!(completed["totalProfit"], "75");
    assert_eq!(completed["exchangeProfit"], "-50");
}

#[tokio::test]
async fn test_daily_profit_groups_by_day() {
    let t = setup_test_app().await;
    seed(&t.app).await;

    let (status, body) = request(t.app.clone(), "GET", "/v1/report/daily", None).await;
    assert_eq!(status, StatusCode::OK);

    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-03-09");
    assert_eq!(days[0]["profit"], "75");
    assert_eq!(days[1]["date"], "2024-03-10");
    assert_eq!(days[1]["profit"], "20");
}

#[tokio::test]
async fn test_drill_down_matches_summary() {
    let t = setup_test_app().await;
    seed(&t.app).await;

    let (_, actual) = request(
        t.app.clone(),
        "GET",
        "/v1/report/drilldown?category=commission",
        None,
    )
    .await;
    assert_eq!(actual["basis"], "actual");
    assert_eq!(actual["total"], "100");
    assert_eq!(actual["rows"].as_array().unwrap().len(), 1);

    let (_, estimated) = request(
        t.app.clone(),
        "GET",
        "/v1/report/drilldown?category=commission&basis=estimated",
        None,
    )
    .await;
    assert_eq!(estimated["total"], "200");

    let (_, penalty) = request(
        t.app.clone(),
        "GET",
        "/v1/report/drilldown?category=penalty",
        None,
    )
    .await;
    assert_eq!(penalty["total"], "20");

    let (status, _) = request(
        t.app.clone(),
        "GET",
        "/v1/report/drilldown?category=bonus",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_maintenance_alerts() {
    let t = setup_test_app().await;
    let now = TimeMs::now().as_ms();

    let mut soon = deposit("received", now - 5 * DAY_MS);
    soon["maintenanceDays"] = json!(6);
    let mut later = deposit("received", now);
    later["maintenanceDays"] = json!(30);
    let mut done = deposit("completed", now - 5 * DAY_MS);
    done["maintenanceDays"] = json!(6);
    for body in [soon, later, done] {
        request(t.app.clone(), "POST", "/v1/transactions", Some(body)).await;
    }

    let (status, body) = request(t.app.clone(), "GET", "/v1/alerts/maintenance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["withinDays"], 3);
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["overdue"], false);
    assert_eq!(alerts[0]["fundStatus"], "已到账");

    let (_, wide) = request(
        t.app.clone(),
        "GET",
        "/v1/alerts/maintenance?withinDays=60",
        None,
    )
    .await;
    assert_eq!(wide["alerts"].as_array().unwrap().len(), 2);

    let (status, _) = request(
        t.app.clone(),
        "GET",
        "/v1/alerts/maintenance?withinDays=-1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
