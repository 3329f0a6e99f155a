//! Status and reason enums for return cases.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a return case, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnStatus {
    /// The return case exists and a label has been issued.
    #[default]
    Created,
    /// The parcel has been scanned by the carrier.
    InTransit,
    /// The parcel has arrived back at the merchant.
    Delivered,
    /// The merchant has refunded the customer.
    Refunded,
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Refunded => "REFUNDED",
        };
        write!(f, "{s}")
    }
}

/// Why a customer is returning a line item.
///
/// The customer flow currently submits every line with
/// [`ReasonCode::NotSpecified`]; the richer codes exist because the backend
/// records them and the merchant dashboard displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// The customer gave no reason.
    #[default]
    NotSpecified,
    /// Item too small.
    SizeTooSmall,
    /// Item too big.
    SizeTooBig,
    /// Item arrived damaged.
    Damaged,
    /// The customer changed their mind.
    ChangedMind,
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotSpecified => "NOT_SPECIFIED",
            Self::SizeTooSmall => "SIZE_TOO_SMALL",
            Self::SizeTooBig => "SIZE_TOO_BIG",
            Self::Damaged => "DAMAGED",
            Self::ChangedMind => "CHANGED_MIND",
        };
        write!(f, "{s}")
    }
}
