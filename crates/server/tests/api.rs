use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{
    EmptyPeriod, IncomeRepository, IncomeRow, IncomeUseCase, SqlIncomeRepository, StorageError,
};
use migration::MigratorTrait;
use server::{PeriodView, ServerOptions, router};

const FAR_PAST: &str = "2000-01-01T00:00:00Z";
const FAR_FUTURE: &str = "2100-01-01T00:00:00+02:00";

async fn use_case() -> IncomeUseCase {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (id, email, name) VALUES (?, ?, ?)",
        vec![1i64.into(), "test@test.com".into(), "test tester".into()],
    ))
    .await
    .unwrap();
    IncomeUseCase::new(Arc::new(SqlIncomeRepository::new(db)))
}

async fn app(view: PeriodView) -> Router {
    router(
        use_case().await,
        ServerOptions {
            view,
            request_timeout: None,
        },
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn add(app: &Router, category_id: i32, amount: f64, description: &str) -> StatusCode {
    let body = json!({
        "user_id": 1,
        "category_id": category_id,
        "amount": amount,
        "description": description,
    });
    send(app, "POST", "/income", body).await.0
}

fn period(start: &str, end: &str) -> Value {
    json!({ "user_id": 1, "start_date": start, "end_date": end })
}

#[tokio::test]
async fn add_then_list_flat() {
    let app = app(PeriodView::Flat).await;

    assert_eq!(add(&app, 2, 100.50, "groceries").await, StatusCode::CREATED);
    assert_eq!(add(&app, 3, 12.0, "refund").await, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/incomes", period(FAR_PAST, FAR_FUTURE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "incomes": [
            { "category_id": 2, "amount_minor": 10050, "description": "groceries" },
            { "category_id": 3, "amount_minor": 1200, "description": "refund" },
        ]})
    );
}

#[tokio::test]
async fn negative_amount_is_bad_request() {
    let app = app(PeriodView::Flat).await;

    let body = json!({ "user_id": 1, "category_id": 2, "amount": -5.0, "description": "x" });
    let (status, body) = send(&app, "POST", "/income", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation failed: amount must be greater than 0");
}

#[tokio::test]
async fn unknown_user_is_internal_error_without_details() {
    let app = app(PeriodView::Flat).await;

    let body = json!({ "user_id": 99, "category_id": 2, "amount": 1.0, "description": "x" });
    let (status, body) = send(&app, "POST", "/income", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
}

#[tokio::test]
async fn inverted_period_is_bad_request() {
    let app = app(PeriodView::Flat).await;

    let (status, body) = send(&app, "GET", "/incomes", period(FAR_FUTURE, FAR_PAST)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "validation failed: start date must not be after end date"
    );
}

#[tokio::test]
async fn missing_dates_are_bad_request() {
    let app = app(PeriodView::Flat).await;

    let (status, _) = send(&app, "GET", "/incomes", json!({ "user_id": 1 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn zero_width_period_is_empty() {
    let app = app(PeriodView::Flat).await;
    add(&app, 2, 10.0, "now").await;

    let (status, body) = send(&app, "GET", "/incomes", period(FAR_PAST, FAR_PAST)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "incomes": [] }));
}

#[tokio::test]
async fn by_category_view_groups_incomes() {
    let app = app(PeriodView::ByCategory).await;
    add(&app, 1, 1.00, "a").await;
    add(&app, 1, 0.33, "b").await;
    add(&app, 2, 2.00, "c").await;

    let (status, body) = send(&app, "GET", "/incomes", period(FAR_PAST, FAR_FUTURE)).await;
    assert_eq!(status, StatusCode::OK);

    let mut categories = body["categories"].as_array().unwrap().clone();
    categories.sort_by_key(|c| c["category_id"].as_i64());
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["category_id"], 1);
    assert_eq!(categories[0]["incomes"][0]["amount_minor"], 100);
    assert_eq!(categories[0]["incomes"][1]["amount_minor"], 33);
    assert_eq!(categories[1]["incomes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn total_endpoint_sums_period() {
    let app = app(PeriodView::Flat).await;
    add(&app, 1, 100.50, "a").await;
    add(&app, 2, 0.25, "b").await;

    let (status, body) = send(&app, "GET", "/incomes/total", period(FAR_PAST, FAR_FUTURE)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total_minor": 10075, "total": "100.75" }));
}

#[tokio::test]
async fn not_found_policy_maps_to_404() {
    let app = router(
        use_case().await.empty_period(EmptyPeriod::NotFound),
        ServerOptions::default(),
    );

    let (status, body) = send(&app, "GET", "/incomes", period(FAR_PAST, FAR_FUTURE)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "incomes not found");
}

struct StalledRepository;

#[async_trait]
impl IncomeRepository for StalledRepository {
    async fn add_income(
        &self,
        _user_id: i64,
        _category_id: i32,
        _amount_minor: i64,
        _description: &str,
    ) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }

    async fn incomes_for_period(
        &self,
        _user_id: i64,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<IncomeRow>, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn request_deadline_maps_to_504() {
    let app = router(
        IncomeUseCase::new(Arc::new(StalledRepository)),
        ServerOptions {
            view: PeriodView::Flat,
            request_timeout: Some(Duration::from_millis(20)),
        },
    );

    assert_eq!(add(&app, 1, 1.0, "slow").await, StatusCode::GATEWAY_TIMEOUT);
    let (status, _) = send(&app, "GET", "/incomes", period(FAR_PAST, FAR_FUTURE)).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}
