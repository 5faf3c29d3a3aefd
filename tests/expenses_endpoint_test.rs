use axum::http::StatusCode;
use serde_json::{json, Value};
use settlement_ledger::api::{self, AppState};
use settlement_ledger::db::init_db;
use settlement_ledger::{Config, Repository};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    _temp: TempDir,
}

fn test_config() -> Config {
    Config {
        port: 0,
        database_path: ":memory:".to_string(),
        utc_offset_hours: 8,
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
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_create_expense_defaults_category() {
    let t = setup_test_app().await;

    let (status, body) = request(
        t.app.clone(),
        "POST",
        "/v1/expenses",
        Some(json!({"amount": "12.50", "spentAt": 1_000})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], "12.5");
    assert_eq!(body["category"], "其他");
    assert_eq!(body["spentAt"], 1_000);
}

#[tokio::test]
async fn test_negative_expense_rejected() {
    let t = setup_test_app().await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/expenses",
        Some(json!({"amount": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_keeps_spent_at_and_delete() {
    let t = setup_test_app().await;

    let (_, created) = request(
        t.app.clone(),
        "POST",
        "/v1/expenses",
        Some(json!({"amount": "30", "category": "餐饮", "spentAt": 5_000})),
    )
    .await;
    let uri = format!("/v1/expenses/{}", created["id"].as_str().unwrap());

    let (status, updated) = request(
        t.app.clone(),
        "PUT",
        &uri,
        Some(json!({"amount": "45", "category": "餐饮", "description": "lunch"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"], "45");
    assert_eq!(updated["spentAt"], 5_000);
    assert_eq!(updated["description"], "lunch");

    let (status, _) = request(t.app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(t.app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(t.app.clone(), "PUT", &uri, Some(json!({"amount": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_and_summary_by_category() {
    let t = setup_test_app().await;

    for (amount, category, at) in [
        ("30", "餐饮", 1_000),
        ("20", "餐饮", 2_000),
        ("100", "房租", 3_000),
        ("5", "", 4_000),
    ] {
        let (status, _) = request(
            t.app.clone(),
            "POST",
            "/v1/expenses",
            Some(json!({"amount": amount, "category": category, "spentAt": at})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = request(t.app.clone(), "GET", "/v1/expenses", None).await;
    assert_eq!(all["count"], 4);
    assert_eq!(all["expenses"][0]["spentAt"], 4_000);

    let (_, food) = request(
        t.app.clone(),
        "GET",
        "/v1/expenses?category=%E9%A4%90%E9%A5%AE",
        None,
    )
    .await;
    assert_eq!(food["count"], 2);

    let (status, summary) = request(t.app.clone(), "GET", "/v1/expenses/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], "155");
    assert_eq!(summary["count"], 4);
    let by_category = summary["byCategory"].as_array().unwrap();
    assert_eq!(by_category[0]["category"], "房租");
    assert_eq!(by_category[1]["category"], "餐饮");
    assert_eq!(by_category[1]["amount"], "50");
    assert_eq!(by_category[2]["category"], "其他");

    let (_, windowed) = request(
        t.app.clone(),
        "GET",
        "/v1/expenses/summary?fromMs=1500&toMs=3000",
        None,
    )
    .await;
    assert_eq!(windowed["total"], "120");
}
