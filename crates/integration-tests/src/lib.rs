//! Integration tests for ReturnWiz.
//!
//! The tests in `tests/` run the portal workflows against a mock backend
//! ([`wiremock`]), asserting both the workflow behavior and the exact wire
//! contract of the five backend operations. No running backend is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p returnwiz-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

use returnwiz_portal::api::HttpPortalApi;

/// A mock backend plus an HTTP client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub api: HttpPortalApi,
}

impl TestBackend {
    /// Start a fresh mock backend.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = Url::parse(&server.uri()).unwrap();
        let api = HttpPortalApi::with_base_url(base_url);
        Self { server, api }
    }
}

/// A two-line order snapshot as the backend would return it.
#[must_use]
pub fn order_snapshot_body() -> Value {
    json!({
        "order_id": "gid://shopify/Order/1001",
        "order_number": "1001",
        "customer_email": "customer@example.dk",
        "currency": "DKK",
        "items": [
            {
                "id": "item-1",
                "product_name": "Cool T-Shirt",
                "variant_name": "Size: L / Black",
                "image_url": "https://cdn.example/shirt.jpg",
                "price": 29900,
                "quantity": 2
            },
            {
                "id": "item-2",
                "product_name": "Warm Hoodie",
                "variant_name": "Size: M / Grey",
                "image_url": "https://cdn.example/hoodie.jpg",
                "price": 49900,
                "quantity": 1
            }
        ]
    })
}

/// A return receipt as the backend would return it.
#[must_use]
pub fn return_receipt_body() -> Value {
    json!({
        "message": "Return created",
        "return_id": "ret-42",
        "tracking_number": "TRACK-123",
        "tenant_used": "acme"
    })
}

/// A tenant record as the backend would return it.
#[must_use]
pub fn tenant_record_body() -> Value {
    json!({
        "id": "t-1",
        "name": "Acme ApS",
        "email": "owner@acme.dk"
    })
}

/// A login response as the backend would return it.
#[must_use]
pub fn login_response_body() -> Value {
    json!({
        "message": "Login successful",
        "tenant_id": "t-1",
        "name": "Acme ApS",
        "email": "owner@acme.dk"
    })
}
