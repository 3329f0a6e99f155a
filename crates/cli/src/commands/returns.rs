//! Customer return flow command.
//!
//! # Usage
//!
//! ```bash
//! # Look up order 1001 and return two of its line items
//! rw-cli return -o 1001 -e customer@example.dk -i item-1,item-2
//! ```
//!
//! Drives the same workflow the portal frontend runs: locate the order,
//! select the requested items, submit once.

use returnwiz_core::LineItemId;
use returnwiz_portal::workflow::ReturnWorkflow;

use super::{CliError, portal_api};

/// File a return for the given line items of an order.
pub async fn create(order_number: &str, email: &str, items: &[String]) -> Result<(), CliError> {
    let (_config, api) = portal_api()?;
    let mut workflow = ReturnWorkflow::new(api);

    tracing::info!("Looking up order {order_number}...");
    workflow.search(order_number, email).await?;

    let order = workflow
        .order()
        .cloned()
        .ok_or(returnwiz_portal::error::PortalError::InvalidAction)?;
    tracing::info!(
        "Found order {} with {} line item(s)",
        order.order_number,
        order.items.len()
    );
    for item in &order.items {
        tracing::info!(
            "  {} - {} ({}) {}",
            item.id,
            item.product_name,
            item.variant_name,
            item.price.display(&order.currency)
        );
    }

    for raw in items {
        let id = LineItemId::new(raw.trim());
        if !order.contains_item(&id) {
            return Err(CliError::UnknownItem(raw.clone()));
        }
        workflow.toggle(&id);
    }

    tracing::info!("Submitting return for {} item(s)...", workflow.selected().len());
    workflow.submit().await?;

    // submit() only succeeds by reaching the receipt
    if let Some(receipt) = workflow.receipt() {
        tracing::info!("Return created: {}", receipt.message);
        tracing::info!("  Return ID: {}", receipt.return_id);
        tracing::info!("  Tracking number: {}", receipt.tracking_number);
        tracing::info!("  Tenant: {}", receipt.tenant_used);
    }

    Ok(())
}
