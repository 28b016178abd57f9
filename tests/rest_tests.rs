//! HTTP-level tests of the payment routes
//!
//! JSON → HTTP request → handler → repository → HTTP response → JSON.

use axum::http::StatusCode;
use axum_test::TestServer;
use paydesk::prelude::*;
use paydesk::actions::CREATE_FAILED_MESSAGE;
use paydesk::storage::{IdentificationGenerator, seed_stats};

/// Always proposes the code of the first seed payment
struct CollidingIdentification;

impl IdentificationGenerator for CollidingIdentification {
    fn generate(&self, _now: DateTime<Utc>) -> String {
        "TX-2025-001-A7B9".to_string()
    }
}

fn make_server_with(store: InMemoryPaymentStore) -> TestServer {
    let router = ServerBuilder::new()
        .with_config(DashboardConfig::for_tests())
        .with_repository(store)
        .build()
        .unwrap();
    TestServer::new(router)
}

fn make_server() -> TestServer {
    make_server_with(InMemoryPaymentStore::new())
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_first_page() {
    let server = make_server();

    let response = server.get("/payments").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"][0]["identification"], "TX-2025-001-A7B9");
    assert_eq!(body["data"][0]["orderAmount"], 65000.0);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["pageSize"], 6);
    assert_eq!(body["pagination"]["total"], 15);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["hasNext"], true);
    assert_eq!(body["dateRange"], "sept 15, 2024 - dic 15, 2024");
}

#[tokio::test]
async fn test_list_search_sort_and_page() {
    let server = make_server();

    let response = server
        .get("/payments")
        .add_query_param("q", "completed")
        .add_query_param("sort", "orderAmount")
        .add_query_param("order", "desc")
        .add_query_param("page", "2")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(body["pagination"]["total"], 10);
    assert_eq!(body["pagination"]["hasPrev"], true);
    assert_eq!(body["pagination"]["hasNext"], false);
}

#[tokio::test]
async fn test_list_date_range() {
    let server = make_server();

    let response = server
        .get("/payments")
        .add_query_param("from", "2024-12-01")
        .add_query_param("to", "2024-12-15")
        .await;

    let body: Value = response.json();
    assert_eq!(body["pagination"]["total"], 3);
    // the label always spans the whole collection
    assert_eq!(body["dateRange"], "sept 15, 2024 - dic 15, 2024");
}

#[tokio::test]
async fn test_list_rejects_bad_parameters() {
    let server = make_server();

    let response = server
        .get("/payments")
        .add_query_param("sort", "recipient")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_QUERY");

    let response = server
        .get("/payments")
        .add_query_param("from", "2024-12-15")
        .add_query_param("to", "2024-12-01")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/payments").add_query_param("page", "two").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_page_past_end_is_empty() {
    let server = make_server();

    let response = server.get("/payments").add_query_param("page", "9").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["page"], 9);
}

// =============================================================================
// Search, stats, lookup
// =============================================================================

#[tokio::test]
async fn test_search_includes_scheme() {
    let server = make_server();

    let response = server
        .get("/payments/search")
        .add_query_param("q", "credit")
        .await;
    response.assert_status_ok();

    let body: Vec<Payment> = response.json();
    assert_eq!(body.len(), 3);
    assert!(body.iter().all(|p| p.scheme == PaymentScheme::Credit));
}

#[tokio::test]
async fn test_stats() {
    let server = make_server();

    let response = server.get("/payments/stats").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["balance"], 1_250_000.0);
    assert_eq!(body["paymentCount"], 15);
    assert_eq!(body["totalPaid"], 980_000.0);
}

#[tokio::test]
async fn test_get_payment() {
    let server = make_server();

    let response = server.get("/payments/10").await;
    response.assert_status_ok();
    let payment: Payment = response.json();
    assert_eq!(payment.recipient, "@marialopez");
    assert_eq!(payment.status, PaymentStatus::Rejected);

    let response = server.get("/payments/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "PAYMENT_NOT_FOUND");
    assert_eq!(body["details"]["id"], "nope");
}

#[tokio::test]
async fn test_invoice_download() {
    let server = make_server();

    let response = server.get("/payments/1/invoice").await;
    response.assert_status_ok();

    let disposition = response.header("content-disposition");
    assert_eq!(
        disposition.to_str().unwrap(),
        "attachment; filename=\"Factura-TX-2025-001-A7B9-KAMIN.txt\""
    );

    let text = response.text();
    assert!(text.contains("FACTURA / INVOICE"));
    assert!(text.contains("@matbaelo"));
    assert!(text.contains("$ 65.000"));

    server
        .get("/payments/missing/invoice")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_payment() {
    let server = make_server();

    let response = server
        .post("/payments")
        .json(&json!({
            "scheme": "limit",
            "handle": "newuser",
            "amount": 50000,
            "wallet": "provedores-pay"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["recipient"], "@newuser");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["currency"], "COP");
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());

    let stats: PaymentStats = server.get("/payments/stats").await.json();
    assert_eq!(stats.total_paid, seed_stats().total_paid + 50_000.0);

    let list: Value = server.get("/payments").await.json();
    assert_eq!(list["data"][0]["recipient"], "@newuser");
    assert_eq!(list["pagination"]["total"], 16);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let server = make_server();

    let response = server
        .post("/payments")
        .json(&json!({
            "scheme": "limit",
            "handle": "newuser",
            "amount": -5,
            "wallet": ""
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"]["fields"]["amount"][0],
        "Amount must be greater than 0"
    );
    assert_eq!(body["details"]["fields"]["wallet"][0], "Wallet is required");

    let stats: Value = server.get("/payments/stats").await.json();
    assert_eq!(stats["paymentCount"], 15);
}

#[tokio::test]
async fn test_create_rejects_non_object_and_malformed_bodies() {
    let server = make_server();

    let response = server.post("/payments").json(&json!([1, 2, 3])).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = server
        .post("/payments")
        .content_type("application/json")
        .text("{not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_create_backend_failure() {
    let server = make_server_with(InMemoryPaymentStore::new().with_failures(RandomFailure::new(1.0)));

    let response = server
        .post("/payments")
        .json(&json!({
            "scheme": "credit",
            "handle": "newuser",
            "amount": "1000",
            "wallet": "business-wallet"
        }))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
    assert_eq!(body["message"], "Network error: Could not create payment");
}

#[tokio::test]
async fn test_create_identifier_exhaustion_is_generic() {
    let server = make_server_with(
        InMemoryPaymentStore::new().with_identifications(CollidingIdentification),
    );

    let response = server
        .post("/payments")
        .json(&json!({
            "scheme": "limit",
            "handle": "newuser",
            "amount": 50000,
            "wallet": "provedores-pay"
        }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let body: Value = response.json();
    assert_eq!(body["code"], "IDENTIFIER_EXHAUSTED");
    assert_eq!(body["message"], CREATE_FAILED_MESSAGE);

    let stats: Value = server.get("/payments/stats").await.json();
    assert_eq!(stats["paymentCount"], 15);
}

#[tokio::test]
async fn test_form_options() {
    let server = make_server();
    let body: Value = server.get("/payment-options").await.json();

    assert_eq!(body["schemes"][0]["value"], "limit");
    assert_eq!(body["schemes"].as_array().unwrap().len(), 3);
    assert_eq!(body["wallets"][2]["value"], "corporate-funds");
}

#[tokio::test]
async fn test_health() {
    let server = make_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
