//! Integration tests for merchant login, session persistence, and the
//! dashboard listing against a mock backend.

#![allow(clippy::unwrap_used)]

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use returnwiz_core::{ReasonCode, ReturnStatus, TenantId};
use returnwiz_portal::error::PortalError;
use returnwiz_portal::session::{JsonFileStore, MemoryStore, SessionContext};

use returnwiz_integration_tests::{TestBackend, login_response_body};

#[tokio::test]
async fn login_sets_session_from_backend_response() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "email": "owner@acme.dk",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response_body()))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut session = SessionContext::restore(MemoryStore::new());
    let current = session
        .login(&backend.api, "owner@acme.dk", "s3cret")
        .await
        .unwrap();

    assert_eq!(current.tenant_id, TenantId::new("t-1"));
    assert_eq!(current.name, "Acme ApS");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn rejected_login_is_generic_invalid_credentials() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "user owner@acme.dk not found"})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut session = SessionContext::restore(MemoryStore::new());
    let err = session
        .login(&backend.api, "owner@acme.dk", "wrong")
        .await
        .unwrap_err();

    // Whatever the backend says, the caller only learns "invalid credentials"
    assert!(matches!(err, PortalError::Auth));
    assert_eq!(err.to_string(), "Invalid credentials.");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn session_survives_a_restart_through_the_file_store() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response_body()))
        .mount(&backend.server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let blob = dir.path().join("session.json");

    let mut session = SessionContext::restore(JsonFileStore::new(&blob));
    session
        .login(&backend.api, "owner@acme.dk", "s3cret")
        .await
        .unwrap();

    // A fresh context restores the persisted blob
    let restored = SessionContext::restore(JsonFileStore::new(&blob));
    assert_eq!(restored.current().unwrap().name, "Acme ApS");

    // Logout clears it for every later restore
    let mut session = SessionContext::restore(JsonFileStore::new(&blob));
    session.logout();
    let after = SessionContext::restore(JsonFileStore::new(&blob));
    assert!(!after.is_authenticated());
}

#[tokio::test]
async fn dashboard_lists_returns_for_the_shop_email() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/returns"))
        .and(query_param("shop_email", "owner@acme.dk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "ret-42",
                "shopify_order_number": "1001",
                "customer_email": "customer@example.dk",
                "tracking_number": "TRACK-123",
                "status": "IN_TRANSIT",
                "items": [
                    {"product_name": "Cool T-Shirt", "quantity": 1, "reason_code": "NOT_SPECIFIED"}
                ]
            },
            {
                "id": "ret-43",
                "shopify_order_number": "1002",
                "customer_email": "other@example.dk",
                "status": "CREATED",
                "items": []
            }
        ])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let email = returnwiz_core::Email::parse("owner@acme.dk").unwrap();
    let listing = returnwiz_portal::api::PortalApi::list_returns(&backend.api, &email)
        .await
        .unwrap();

    assert_eq!(listing.len(), 2);
    let first = listing.first().unwrap();
    assert_eq!(first.status, ReturnStatus::InTransit);
    assert_eq!(first.tracking_number.as_ref().unwrap().as_str(), "TRACK-123");
    assert_eq!(
        first.items.first().unwrap().reason_code,
        ReasonCode::NotSpecified
    );
    // Tracking is optional until a label is issued
    assert!(listing.get(1).unwrap().tracking_number.is_none());
}
