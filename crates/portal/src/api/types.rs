//! Wire types for the ReturnWiz backend service.
//!
//! Field names must match the backend contract bit-for-bit; every struct here
//! serializes straight to the documented JSON shapes.

use serde::{Deserialize, Serialize};

use returnwiz_core::{
    Email, LineItemId, OrderId, Price, ReasonCode, ReturnId, ReturnStatus, TenantId,
    TrackingNumber,
};

// =============================================================================
// Order lookup
// =============================================================================

/// Request body for `POST /returns/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLookupRequest {
    /// The order number the customer received, e.g. `1001`.
    pub order_number: String,
    /// The email the order was placed with.
    pub email: String,
}

/// One purchased product/variant eligible for return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Backend line item ID.
    pub id: LineItemId,
    /// Product title.
    pub product_name: String,
    /// Variant title, e.g. `Size: L / Black`.
    pub variant_name: String,
    /// Product image for display.
    pub image_url: String,
    /// Unit price in minor currency units.
    pub price: Price,
    /// Quantity originally ordered.
    pub quantity: u32,
}

/// Response body for `POST /returns/search`.
///
/// Immutable once fetched; owned exclusively by the return workflow for the
/// duration of one return session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSnapshot {
    /// Backend order ID.
    pub order_id: OrderId,
    /// Customer-facing order number.
    pub order_number: String,
    /// Email the order was placed with.
    pub customer_email: Email,
    /// ISO 4217 currency code for the item prices.
    pub currency: String,
    /// The order's line items.
    pub items: Vec<LineItem>,
}

impl OrderSnapshot {
    /// Whether the snapshot contains a line item with the given ID.
    #[must_use]
    pub fn contains_item(&self, id: &LineItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Look up a line item by ID.
    #[must_use]
    pub fn item(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

// =============================================================================
// Return creation
// =============================================================================

/// One line of a return request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnItem {
    /// The line item being returned.
    pub id: LineItemId,
    /// Product title, denormalized for the backend's records.
    pub product_name: String,
    /// Quantity to return. The customer flow always sends 1 per selected
    /// line, regardless of the quantity originally ordered.
    pub quantity: u32,
    /// Why the item is coming back.
    pub reason: ReasonCode,
}

/// Request body for `POST /returns`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateReturnRequest {
    /// Customer-facing order number.
    pub order_number: String,
    /// Email the order was placed with.
    pub email: String,
    /// The lines being returned, submitted together.
    pub items: Vec<ReturnItem>,
}

/// Response body for `POST /returns` - the terminal artifact of a return
/// session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnReceipt {
    /// Human-readable confirmation from the backend.
    pub message: String,
    /// The created return case.
    pub return_id: ReturnId,
    /// Carrier tracking number for the return label.
    pub tracking_number: TrackingNumber,
    /// Which tenant the return was filed under.
    pub tenant_used: String,
}

// =============================================================================
// Tenant registration
// =============================================================================

/// Request body for `POST /tenants/register`.
///
/// Sent twice during onboarding: a partial payload when step 1 creates the
/// account, and the full payload at the final commit. Optional fields are
/// omitted from the JSON entirely when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RegisterTenantRequest {
    /// Company name.
    pub name: String,
    /// Contact/login email.
    pub email: String,
    /// Chosen login password.
    pub password: String,
    /// Danish CVR registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvr_number: Option<String>,
    /// Chosen webshop handle (subdomain label).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webshop_name: Option<String>,
    /// Shopify shop URL, e.g. `your-shop.myshopify.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopify_url: Option<String>,
    /// Bring carrier API user (email/ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bring_api_user: Option<String>,
    /// Bring carrier API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bring_api_key: Option<String>,
    /// Bring customer ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bring_customer_id: Option<String>,
    /// Portal logo, uploaded at the final commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Portal top banner, uploaded at the final commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
}

/// Tenant record returned by `POST /tenants/register`.
///
/// The backend returns the full record; the workflow only needs the identity
/// fields, so everything else is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantRecord {
    /// Backend tenant ID, when included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TenantId>,
    /// Company name.
    pub name: String,
    /// Contact/login email.
    pub email: Email,
}

// =============================================================================
// Merchant dashboard
// =============================================================================

/// One line of a return case in the dashboard listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnOverviewItem {
    /// Product title.
    pub product_name: String,
    /// Quantity being returned.
    pub quantity: u32,
    /// Why the item is coming back.
    pub reason_code: ReasonCode,
}

/// One return case in the `GET /returns?shop_email=` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnOverview {
    /// The return case.
    pub id: ReturnId,
    /// Customer-facing order number at the originating shop.
    pub shopify_order_number: String,
    /// The returning customer.
    pub customer_email: Email,
    /// Carrier tracking number, absent until a label is issued.
    #[serde(default)]
    pub tracking_number: Option<TrackingNumber>,
    /// Lifecycle status.
    pub status: ReturnStatus,
    /// The lines being returned.
    pub items: Vec<ReturnOverviewItem>,
}

// =============================================================================
// Login
// =============================================================================

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Merchant login email.
    pub email: String,
    /// Merchant login password.
    pub password: String,
}

/// Response body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Human-readable confirmation from the backend.
    pub message: String,
    /// The authenticated tenant.
    pub tenant_id: TenantId,
    /// Merchant display name.
    pub name: String,
    /// Merchant login email.
    pub email: Email,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_snapshot_wire_shape() {
        let json = serde_json::json!({
            "order_id": "gid://shopify/Order/1001",
            "order_number": "1001",
            "customer_email": "test@test.dk",
            "currency": "DKK",
            "items": [{
                "id": "item-1",
                "product_name": "Cool T-Shirt",
                "variant_name": "Size: L / Black",
                "image_url": "https://cdn.example/shirt.jpg",
                "price": 29900,
                "quantity": 2
            }]
        });

        let snapshot: OrderSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.order_number, "1001");
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.contains_item(&LineItemId::new("item-1")));
        assert!(!snapshot.contains_item(&LineItemId::new("item-2")));
    }

    #[test]
    fn test_create_return_request_wire_shape() {
        let request = CreateReturnRequest {
            order_number: "1001".to_string(),
            email: "test@test.dk".to_string(),
            items: vec![ReturnItem {
                id: LineItemId::new("item-1"),
                product_name: "Cool T-Shirt".to_string(),
                quantity: 1,
                reason: ReasonCode::NotSpecified,
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0]["reason"], "NOT_SPECIFIED");
        assert_eq!(json["items"][0]["quantity"], 1);
    }

    #[test]
    fn test_register_request_omits_absent_fields() {
        let request = RegisterTenantRequest {
            name: "Acme".to_string(),
            email: "a@acme.dk".to_string(),
            password: "x".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(!object.contains_key("shopify_url"));
    }

    #[test]
    fn test_tenant_record_ignores_extra_fields() {
        let json = serde_json::json!({
            "id": "t-1",
            "name": "Acme",
            "email": "a@acme.dk",
            "cvr_number": "12345678",
            "created_at": "2026-01-01T00:00:00Z"
        });

        let record: TenantRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.name, "Acme");
        assert_eq!(record.id, Some(TenantId::new("t-1")));
    }

    #[test]
    fn test_return_overview_optional_tracking() {
        let json = serde_json::json!({
            "id": "r-1",
            "shopify_order_number": "1001",
            "customer_email": "test@test.dk",
            "status": "CREATED",
            "items": []
        });

        let overview: ReturnOverview = serde_json::from_value(json).unwrap();
        assert!(overview.tracking_number.is_none());
        assert_eq!(overview.status, ReturnStatus::Created);
    }
}
