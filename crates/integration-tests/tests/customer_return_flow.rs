//! Integration tests for the customer return flow against a mock backend.
//!
//! Covers the full journey (lookup, selection, submission) and the exact
//! request bodies the backend receives.

#![allow(clippy::unwrap_used)]

use serde_json::Value;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use returnwiz_core::LineItemId;
use returnwiz_portal::error::PortalError;
use returnwiz_portal::workflow::{ReturnStage, ReturnWorkflow};

use returnwiz_integration_tests::{TestBackend, order_snapshot_body, return_receipt_body};

#[tokio::test]
async fn full_return_journey_submits_selected_items() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/returns/search"))
        .and(body_json(serde_json::json!({
            "order_number": "1001",
            "email": "customer@example.dk"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_snapshot_body()))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/returns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(return_receipt_body()))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut workflow = ReturnWorkflow::new(backend.api.clone());
    workflow.search("1001", "customer@example.dk").await.unwrap();
    assert_eq!(workflow.stage(), ReturnStage::Selecting);

    workflow.toggle(&LineItemId::new("item-1"));
    assert!(workflow.can_submit());

    workflow.submit().await.unwrap();
    assert_eq!(workflow.stage(), ReturnStage::Complete);

    let receipt = workflow.receipt().unwrap();
    assert_eq!(receipt.tracking_number.as_str(), "TRACK-123");
    assert_eq!(receipt.tenant_used, "acme");

    // Exact body of the creation request: one line, quantity fixed at 1,
    // reason defaulted
    let requests = backend.server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/returns" && r.method.as_str() == "POST")
        .unwrap();
    let body: Value = create.body_json().unwrap();
    assert_eq!(body["order_number"], "1001");
    assert_eq!(body["email"], "customer@example.dk");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "item-1");
    assert_eq!(items[0]["product_name"], "Cool T-Shirt");
    assert_eq!(items[0]["quantity"], 1);
    assert_eq!(items[0]["reason"], "NOT_SPECIFIED");
}

#[tokio::test]
async fn failed_lookup_stays_on_search_with_generic_message() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/returns/search"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "order 9999 not in database"})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut workflow = ReturnWorkflow::new(backend.api.clone());
    let err = workflow.search("9999", "customer@example.dk").await.unwrap_err();

    assert_eq!(workflow.stage(), ReturnStage::Searching);
    let PortalError::Lookup(message) = err else {
        panic!("expected lookup error");
    };
    // The backend's detail must not leak to the customer
    assert_eq!(message, "Could not find your order. Check your details.");
    assert_eq!(workflow.last_error(), Some(message.as_str()));
}

#[tokio::test]
async fn failed_submission_preserves_selection_for_resubmit() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/returns/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_snapshot_body()))
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/returns"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/returns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(return_receipt_body()))
        .mount(&backend.server)
        .await;

    let mut workflow = ReturnWorkflow::new(backend.api.clone());
    workflow.search("1001", "customer@example.dk").await.unwrap();
    workflow.toggle(&LineItemId::new("item-1"));
    workflow.toggle(&LineItemId::new("item-2"));

    let err = workflow.submit().await.unwrap_err();
    assert!(matches!(err, PortalError::Submission(_)));
    assert_eq!(workflow.stage(), ReturnStage::Selecting);
    assert_eq!(workflow.selected().len(), 2);

    // A user-initiated retry re-sends the same request and completes
    workflow.submit().await.unwrap();
    assert_eq!(workflow.stage(), ReturnStage::Complete);
}

#[tokio::test]
async fn empty_search_fields_never_reach_the_backend() {
    let backend = TestBackend::start().await;
    let mut workflow = ReturnWorkflow::new(backend.api.clone());

    let err = workflow.search("  ", "customer@example.dk").await.unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)));

    let requests = backend.server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}
