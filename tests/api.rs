use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use receipt_points::api::{router, AppState, ErrorResponse, PointsResponse, ProcessResponse};
use receipt_points::{ScoreStore, SequentialGenerator};
use serde::de::DeserializeOwned;
use std::io;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const TARGET_RECEIPT: &str = r#"{
  "retailer": "Target",
  "purchaseDate": "2022-01-01",
  "purchaseTime": "13:01",
  "items": [
    {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
    {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
    {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
    {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
    {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
  ],
  "total": "35.35"
}"#;

const CORNER_MARKET_RECEIPT: &str = r#"{
  "retailer": "M&M Corner Market",
  "purchaseDate": "2022-03-20",
  "purchaseTime": "14:33",
  "items": [
    {"shortDescription": "Gatorade", "price": "2.25"},
    {"shortDescription": "Gatorade", "price": "2.25"},
    {"shortDescription": "Gatorade", "price": "2.25"},
    {"shortDescription": "Gatorade", "price": "2.25"}
  ],
  "total": "9.00"
}"#;

fn test_app() -> (Router, Arc<ScoreStore>) {
    let store = Arc::new(ScoreStore::new());
    let state = AppState::new(store.clone(), Arc::new(SequentialGenerator::new("receipt")));
    (router(state, 64 * 1024), store)
}

async fn post_receipt(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get_points(app: &Router, id: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("GET")
        .uri(format!("/receipts/{}/points", id))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_process_then_fetch_points() {
    let (app, _) = test_app();

    let (status, body) = post_receipt(&app, TARGET_RECEIPT).await;
    assert_eq!(status, StatusCode::OK);
    let processed: ProcessResponse = json(&body);
    assert_eq!(processed.id, "receipt-1");

    let (status, body) = get_points(&app, &processed.id).await;
    assert_eq!(status, StatusCode::OK);
    let points: PointsResponse = json(&body);
    assert_eq!(points.points, 33);
}

#[tokio::test]
async fn test_each_receipt_gets_its_own_id() {
    let (app, store) = test_app();

    let (_, first) = post_receipt(&app, TARGET_RECEIPT).await;
    let (_, second) = post_receipt(&app, CORNER_MARKET_RECEIPT).await;
    let first: ProcessResponse = json(&first);
    let second: ProcessResponse = json(&second);

    assert_ne!(first.id, second.id);
    assert_eq!(store.len(), 2);

    let (_, body) = get_points(&app, &second.id).await;
    assert_eq!(json::<PointsResponse>(&body).points, 109);
}

#[tokio::test]
async fn test_response_body_shape() {
    let (app, _) = test_app();

    let (_, body) = post_receipt(&app, CORNER_MARKET_RECEIPT).await;
    let value: serde_json::Value = json(&body);
    assert_eq!(value, serde_json::json!({"id": "receipt-1"}));

    let (_, body) = get_points(&app, "receipt-1").await;
    let value: serde_json::Value = json(&body);
    assert_eq!(value, serde_json::json!({"points": 109}));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (app, _) = test_app();

    let (status, body) = get_points(&app, "never-issued").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = json(&body);
    assert_eq!(error.error, "Receipt not found");
}

#[tokio::test]
async fn test_non_numeric_total_is_rejected_and_not_stored() {
    let (app, store) = test_app();
    let body = TARGET_RECEIPT.replace("\"35.35\"", "\"thirty-five\"");

    let (status, body) = post_receipt(&app, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json(&body);
    assert!(error.error.starts_with("Cannot compute points"), "{}", error.error);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_missing_total_is_rejected() {
    let (app, store) = test_app();

    let (status, _) = post_receipt(&app, r#"{"retailer": "Target", "items": []}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (app, store) = test_app();

    for body in ["{", "not json", r#"{"total": 35.35}"#, "42"] {
        let (status, body) = post_receipt(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = json(&body);
        assert!(error.error.starts_with("Invalid receipt payload"), "{}", error.error);
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_bad_optional_fields_still_score() {
    let (app, _) = test_app();
    let body = r#"{
      "retailer": "abc",
      "purchaseDate": "not a date",
      "purchaseTime": "25:99",
      "items": [{"shortDescription": "abc", "price": "free"}],
      "total": "1.10"
    }"#;

    let (status, body) = post_receipt(&app, body).await;
    assert_eq!(status, StatusCode::OK);
    let processed: ProcessResponse = json(&body);

    let (_, body) = get_points(&app, &processed.id).await;
    assert_eq!(json::<PointsResponse>(&body).points, 3);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method("GET")
        .uri("/receipts/process")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_total_with_many_fractional_digits_is_scored() {
    let (app, _) = test_app();
    let body = CORNER_MARKET_RECEIPT.replace("\"9.00\"", "\"10.1234567\"");

    let (status, body) = post_receipt(&app, &body).await;
    assert_eq!(status, StatusCode::OK);
    let processed: ProcessResponse = json(&body);

    // 14 retailer + 10 pairs + 5 high total + 10 afternoon
    let (_, body) = get_points(&app, &processed.id).await;
    assert_eq!(json::<PointsResponse>(&body).points, 39);
}

#[derive(Clone)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_rejection_warning_omits_client_fields() {
    let logs = CapturedLogs(Arc::new(Mutex::new(Vec::new())));
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (app, _) = test_app();
    let body = TARGET_RECEIPT
        .replace("\"Target\"", "\"Private Retailer Name\"")
        .replace("\"35.35\"", "\"n/a\"");
    let (status, _) = post_receipt(&app, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Rejected receipt"), "{}", output);
    assert!(!output.contains("Private Retailer Name"), "{}", output);
}
