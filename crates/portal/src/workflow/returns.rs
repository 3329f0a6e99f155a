//! The customer return journey as a finite-state machine.
//!
//! `SEARCHING → SELECTING → SUBMITTING → COMPLETE`. Errors never advance the
//! machine: a failed lookup stays in `SEARCHING`, a failed submission drops
//! back to `SELECTING` with the selection preserved.

use std::collections::HashSet;
use std::mem;

use tracing::info;

use returnwiz_core::{LineItemId, ReasonCode};

use crate::api::types::{
    CreateReturnRequest, OrderLookupRequest, OrderSnapshot, ReturnItem, ReturnReceipt,
};
use crate::api::PortalApi;
use crate::error::PortalError;

/// User-facing message for a failed order lookup.
const LOOKUP_FAILED: &str = "Could not find your order. Check your details.";

/// User-facing message for a failed return creation.
const SUBMISSION_FAILED: &str = "Could not create the return. Please try again.";

/// User-facing message for missing search fields.
const SEARCH_FIELDS_REQUIRED: &str = "Order number and email are required.";

/// Observable stage of the return workflow, without the state-carried data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnStage {
    /// Waiting for an order number and email.
    Searching,
    /// An order is loaded; the customer is picking items to return.
    Selecting,
    /// A return request is on the wire.
    Submitting,
    /// The return case exists; the receipt is on display.
    Complete,
}

/// Internal state, carrying exactly the data that exists in each stage.
enum State {
    Searching,
    Selecting {
        order: OrderSnapshot,
        selected: HashSet<LineItemId>,
    },
    Submitting {
        order: OrderSnapshot,
        selected: HashSet<LineItemId>,
    },
    Complete {
        receipt: ReturnReceipt,
    },
}

/// The customer return workflow.
///
/// One instance drives one return session. The order snapshot is owned
/// exclusively by the workflow from lookup until `back()`/`restart()`
/// discards it; the selection is always a subset of the snapshot's item ids
/// and is cleared whenever the snapshot changes.
///
/// Actions take `&mut self`, so at most one lookup or submission can be
/// outstanding per instance. There is no way to cancel a dispatched call;
/// the workflow processes whichever response arrives.
pub struct ReturnWorkflow<A> {
    api: A,
    state: State,
    error: Option<String>,
}

impl<A: PortalApi> ReturnWorkflow<A> {
    /// Create a workflow in the `SEARCHING` stage.
    pub const fn new(api: A) -> Self {
        Self {
            api,
            state: State::Searching,
            error: None,
        }
    }

    /// The current stage.
    #[must_use]
    pub const fn stage(&self) -> ReturnStage {
        match self.state {
            State::Searching => ReturnStage::Searching,
            State::Selecting { .. } => ReturnStage::Selecting,
            State::Submitting { .. } => ReturnStage::Submitting,
            State::Complete { .. } => ReturnStage::Complete,
        }
    }

    /// The loaded order, present in the selecting/submitting stages.
    #[must_use]
    pub const fn order(&self) -> Option<&OrderSnapshot> {
        match &self.state {
            State::Selecting { order, .. } | State::Submitting { order, .. } => Some(order),
            State::Searching | State::Complete { .. } => None,
        }
    }

    /// The current selection, empty outside the selecting/submitting stages.
    #[must_use]
    pub fn selected(&self) -> &HashSet<LineItemId> {
        static EMPTY: std::sync::LazyLock<HashSet<LineItemId>> =
            std::sync::LazyLock::new(HashSet::new);
        match &self.state {
            State::Selecting { selected, .. } | State::Submitting { selected, .. } => selected,
            State::Searching | State::Complete { .. } => &EMPTY,
        }
    }

    /// The receipt, present once the workflow is complete.
    #[must_use]
    pub const fn receipt(&self) -> Option<&ReturnReceipt> {
        match &self.state {
            State::Complete { receipt } => Some(receipt),
            _ => None,
        }
    }

    /// The message of the last failed action, cleared by the next action.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `submit()` is currently enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(&self.state, State::Selecting { selected, .. } if !selected.is_empty())
    }

    /// Look up an order by number and email.
    ///
    /// Only valid in the `SEARCHING` stage. On success the order snapshot is
    /// stored with an empty selection and the workflow moves to `SELECTING`.
    /// On failure the workflow stays in `SEARCHING`; the lookup is not
    /// retried automatically.
    ///
    /// # Errors
    ///
    /// `Validation` if either field is empty (no network call is made),
    /// `Lookup` if the backend rejects the lookup, `InvalidAction` outside
    /// `SEARCHING`.
    pub async fn search(&mut self, order_number: &str, email: &str) -> Result<(), PortalError> {
        if !matches!(self.state, State::Searching) {
            return Err(PortalError::InvalidAction);
        }
        self.error = None;

        if order_number.trim().is_empty() || email.trim().is_empty() {
            return Err(self.fail(PortalError::Validation(SEARCH_FIELDS_REQUIRED.to_string())));
        }

        let request = OrderLookupRequest {
            order_number: order_number.trim().to_string(),
            email: email.trim().to_string(),
        };

        match self.api.search_order(&request).await {
            Ok(order) => {
                info!(order_number = %order.order_number, "order located");
                self.state = State::Selecting {
                    order,
                    selected: HashSet::new(),
                };
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "order lookup failed");
                Err(self.fail(PortalError::Lookup(LOOKUP_FAILED.to_string())))
            }
        }
    }

    /// Toggle a line item in or out of the selection.
    ///
    /// A no-op for ids that do not belong to the loaded order, and outside
    /// the `SELECTING` stage.
    pub fn toggle(&mut self, item_id: &LineItemId) {
        if let State::Selecting { order, selected } = &mut self.state {
            if !order.contains_item(item_id) {
                return;
            }
            if !selected.remove(item_id) {
                selected.insert(item_id.clone());
            }
        }
    }

    /// Submit the selected items as one return request.
    ///
    /// Quantity is fixed at 1 per selected line and the reason code at
    /// `NOT_SPECIFIED`; see the product notes. On success the receipt is
    /// stored and the workflow moves to `COMPLETE`. On failure the workflow
    /// returns to `SELECTING` with order and selection intact; resubmission
    /// re-sends the full request.
    ///
    /// # Errors
    ///
    /// `Validation` if the selection is empty, `Submission` if the backend
    /// rejects the request, `InvalidAction` outside `SELECTING`.
    pub async fn submit(&mut self) -> Result<(), PortalError> {
        if !self.can_submit() {
            if matches!(self.state, State::Selecting { .. }) {
                self.error = None;
                return Err(
                    self.fail(PortalError::Validation("Select at least one item.".to_string()))
                );
            }
            return Err(PortalError::InvalidAction);
        }
        self.error = None;

        let State::Selecting { order, selected } = mem::replace(&mut self.state, State::Searching)
        else {
            // can_submit() established the stage above
            return Err(PortalError::InvalidAction);
        };

        let request = build_return_request(&order, &selected);
        self.state = State::Submitting { order, selected };

        match self.api.create_return(&request).await {
            Ok(receipt) => {
                info!(return_id = %receipt.return_id, "return created");
                self.state = State::Complete { receipt };
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "return creation failed");
                // Selection preserved for a user-initiated resubmission
                let State::Submitting { order, selected } =
                    mem::replace(&mut self.state, State::Searching)
                else {
                    return Err(PortalError::InvalidAction);
                };
                self.state = State::Selecting { order, selected };
                Err(self.fail(PortalError::Submission(SUBMISSION_FAILED.to_string())))
            }
        }
    }

    /// Return to the search form, discarding the order and selection.
    ///
    /// A no-op outside the `SELECTING` stage.
    pub fn back(&mut self) {
        if matches!(self.state, State::Selecting { .. }) {
            self.state = State::Searching;
            self.error = None;
        }
    }

    /// Reset to a freshly constructed workflow, clearing all transient data
    /// and error state. Always permitted.
    pub fn restart(&mut self) {
        self.state = State::Searching;
        self.error = None;
    }

    fn fail(&mut self, err: PortalError) -> PortalError {
        self.error = Some(err.to_string());
        err
    }
}

/// Build the wire request from the snapshot and selection.
///
/// Iterates the snapshot (not the set) so item order is stable.
fn build_return_request(
    order: &OrderSnapshot,
    selected: &HashSet<LineItemId>,
) -> CreateReturnRequest {
    let items = order
        .items
        .iter()
        .filter(|item| selected.contains(&item.id))
        .map(|item| ReturnItem {
            id: item.id.clone(),
            product_name: item.product_name.clone(),
            quantity: 1,
            reason: ReasonCode::NotSpecified,
        })
        .collect();

    CreateReturnRequest {
        order_number: order.order_number.clone(),
        email: order.customer_email.as_str().to_string(),
        items,
    }
}
