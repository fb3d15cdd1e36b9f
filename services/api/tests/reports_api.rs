//! Reports API tests, driven in-process against the memory store.

use api_lib::adapters::MemoryReportStore;
use api_lib::config::Config;
use api_lib::web::{router, state::AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: None,
        db_max_connections: 1,
        log_level: tracing::Level::DEBUG,
        allowed_origin: "http://localhost:3000".to_string(),
        public_base_url: Url::parse("https://subs.example.com/").unwrap(),
    }
}

fn setup_test_app() -> (Router, Arc<MemoryReportStore>) {
    let store = Arc::new(MemoryReportStore::new());
    let state = Arc::new(AppState {
        reports: store.clone(),
        config: Arc::new(test_config()),
    });
    (router(state), store)
}

async fn get_body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn netflix() -> Value {
    json!({
        "id": "SUB-1",
        "serviceName": "Netflix",
        "category": "Streaming",
        "status": "Active",
        "billingCycle": "Monthly",
        "monthlyCost": 15.49
    })
}

async fn save(app: &Router, body: Value) -> String {
    let response = app.clone().oneshot(post_json("/api/reports", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    json["reportId"].as_str().unwrap().to_string()
}

// ========== Save / Load ==========

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let (app, _) = setup_test_app();
    let id = save(&app, json!({ "subscriptions": [netflix()], "authorName": "Alice" })).await;

    let response = app
        .oneshot(get(&format!("/api/reports?id={}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    let report = &json["report"];
    assert_eq!(report["id"], id.as_str());
    assert_eq!(report["authorName"], "Alice");
    assert_eq!(report["subscriptions"][0]["serviceName"], "Netflix");
    assert_eq!(report["subscriptions"], json!([netflix()]));
    assert_eq!(report["filters"], json!({}));
    assert_eq!(report["view"], "treemap");
    assert_eq!(report["metric"], "revenue");
    assert_eq!(report["createdAt"], report["updatedAt"]);
}

#[tokio::test]
async fn test_save_preserves_filters_view_and_summary() {
    let (app, _) = setup_test_app();
    let summary = json!({
        "totalMonthly": 15.49,
        "totalAnnual": 185.88,
        "active": 1,
        "cancelled": 0,
        "avgMonthlyPerSub": 15.49
    });
    let id = save(
        &app,
        json!({
            "subscriptions": [netflix()],
            "filters": { "category": "Streaming", "status": "Active" },
            "view": "bubble",
            "metric": "count",
            "summary": summary,
            "authorName": "Bob"
        }),
    )
    .await;

    let response = app
        .oneshot(get(&format!("/api/reports?id={}", id)))
        .await
        .unwrap();
    let report = get_body_json(response).await["report"].clone();
    assert_eq!(report["filters"], json!({ "category": "Streaming", "status": "Active" }));
    assert_eq!(report["view"], "bubble");
    assert_eq!(report["metric"], "count");
    assert_eq!(report["summary"], summary);
}

#[tokio::test]
async fn test_blank_author_defaults_to_anonymous() {
    let (app, _) = setup_test_app();
    let id = save(&app, json!({ "subscriptions": [], "authorName": "  " })).await;

    let response = app
        .oneshot(get(&format!("/api/reports?id={}", id)))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["report"]["authorName"], "Anonymous");
    assert_eq!(json["report"]["subscriptions"], json!([]));
}

#[tokio::test]
async fn test_save_returns_durable_share_url() {
    let (app, _) = setup_test_app();
    let response = app
        .oneshot(post_json("/api/reports", &json!({ "subscriptions": [netflix()] })))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let id = json["reportId"].as_str().unwrap();
    assert_eq!(
        json["shareUrl"],
        format!("https://subs.example.com/?reportId={}", id)
    );
}

#[tokio::test]
async fn test_save_without_subscriptions_is_rejected() {
    let (app, store) = setup_test_app();
    let response = app
        .oneshot(post_json("/api/reports", &json!({ "authorName": "Alice" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid request: subscriptions array required");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_save_with_non_array_subscriptions_is_rejected() {
    let (app, store) = setup_test_app();
    let response = app
        .oneshot(post_json("/api/reports", &json!({ "subscriptions": "Netflix" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_save_with_unparseable_body_is_rejected() {
    let (app, _) = setup_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/reports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_load_without_id_is_rejected() {
    let (app, _) = setup_test_app();
    let response = app.oneshot(get("/api/reports")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_body_json(response).await["error"], "Report ID required");
}

#[tokio::test]
async fn test_load_with_malformed_id_is_invalid_not_missing() {
    let (app, _) = setup_test_app();
    let response = app
        .oneshot(get("/api/reports?id=definitely-not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_body_json(response).await["error"], "Invalid report ID");
}

#[tokio::test]
async fn test_load_unknown_id_is_not_found() {
    let (app, _) = setup_test_app();
    let response = app
        .oneshot(get("/api/reports?id=0b8f3a2e-8d59-4c1e-9d7c-4d3f0f2b6a11"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_body_json(response).await["error"], "Report not found");
}

#[tokio::test]
async fn test_concurrent_saves_create_independent_reports() {
    let (app, store) = setup_test_app();
    let body = json!({ "subscriptions": [netflix()] });

    let (a, b) = tokio::join!(save(&app, body.clone()), save(&app, body));
    assert_ne!(a, b);
    assert_eq!(store.len().await, 2);
}

// ========== Live View / Export ==========

fn mixed_report() -> Value {
    json!({
        "subscriptions": [
            { "id": "SUB-1", "serviceName": "Spotify", "category": "Music", "status": "Active",
              "billingCycle": "Monthly", "monthlyCost": 10 },
            { "id": "SUB-2", "serviceName": "Prime", "category": "Shopping", "status": "Cancelled",
              "billingCycle": "Annual", "monthlyCost": 120, "notes": "gift \"from\" mom" },
            { "id": "SUB-3", "serviceName": "Game Pass", "category": "Gaming", "status": "Paused",
              "billingCycle": "Monthly", "monthlyCost": 17 }
        ],
        "filters": { "status": "Active" },
        "summary": { "totalMonthly": 999 }
    })
}

#[tokio::test]
async fn test_view_recomputes_instead_of_trusting_stored_summary() {
    let (app, _) = setup_test_app();
    let id = save(&app, mixed_report()).await;

    let response = app
        .oneshot(get(&format!("/api/reports/{}/view", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["records"].as_array().unwrap().len(), 1);
    assert_eq!(json["summary"]["totalMonthly"], 10.0);
    assert_eq!(json["summary"]["active"], 1);
    assert_eq!(json["slices"][0]["percentage"], 100.0);
    assert_eq!(json["categories"][0]["category"], "Music");
}

#[tokio::test]
async fn test_all_label_filters_keep_every_record() {
    let (app, _) = setup_test_app();
    let mut body = mixed_report();
    body["filters"] = json!({
        "category": "All categories",
        "billing": "",
        "status": "All statuses"
    });
    let id = save(&app, body).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/api/reports?id={}", id)))
        .await
        .unwrap();
    assert_eq!(get_body_json(response).await["report"]["filters"], json!({}));

    let response = app
        .clone()
        .oneshot(get(&format!("/api/reports/{}/view", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["records"].as_array().unwrap().len(), 3);
    assert_eq!(json["summary"]["totalMonthly"], 37.0);

    let response = app
        .oneshot(get(&format!("/api/reports/{}/export/json", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_view_of_unknown_report_is_not_found() {
    let (app, _) = setup_test_app();
    let response = app
        .oneshot(get("/api/reports/0b8f3a2e-8d59-4c1e-9d7c-4d3f0f2b6a11/view"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_csv_of_unfiltered_report() {
    let (app, _) = setup_test_app();
    let mut body = mixed_report();
    body["filters"] = json!({});
    let id = save(&app, body).await;

    let response = app
        .oneshot(get(&format!("/api/reports/{}/export/csv", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"subscriptions.csv\""
    );

    let csv = get_body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("id,serviceName,category"));
    assert_eq!(
        lines[2],
        r#""SUB-2","Prime","Shopping","Cancelled","Annual","120","","","","gift ""from"" mom""#
    );
}

#[tokio::test]
async fn test_export_json_applies_stored_filters() {
    let (app, _) = setup_test_app();
    let id = save(&app, mixed_report()).await;

    let response = app
        .oneshot(get(&format!("/api/reports/{}/export/json", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let json = get_body_json(response).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["serviceName"], "Spotify");
}

#[tokio::test]
async fn test_export_unknown_format_is_rejected() {
    let (app, _) = setup_test_app();
    let id = save(&app, mixed_report()).await;

    let response = app
        .oneshot(get(&format!("/api/reports/{}/export/xlsx", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup_test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_text(response).await, "ok");
}
