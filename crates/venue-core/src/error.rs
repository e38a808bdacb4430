//! Error types for the venue core.
//!
//! Matching itself cannot fail once an order is admitted: processing is
//! bounded arithmetic over available quantities. Everything surfaced
//! here is rejected synchronously before any state is touched; internal
//! invariant violations (e.g. a negative level aggregate) are
//! programming faults and assert instead.

use thiserror::Error;

/// Caller-facing submission errors. Each carries the caller's order id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Structurally invalid request; nothing was mutated or counted.
    #[error("invalid order: {reason}")]
    InvalidOrder { order_id: String, reason: String },

    /// The order id was already used by an earlier submission.
    #[error("duplicate order_id")]
    DuplicateOrderId { order_id: String },
}

impl EngineError {
    pub(crate) fn invalid(order_id: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidOrder {
            order_id: order_id.into(),
            reason: reason.into(),
        }
    }

    /// The order id the failing submission carried.
    pub fn order_id(&self) -> &str {
        match self {
            EngineError::InvalidOrder { order_id, .. } => order_id,
            EngineError::DuplicateOrderId { order_id } => order_id,
        }
    }
}
