//! Order representation and submission payload.
//!
//! An [`Order`] is created at admission and mutated only by the matching
//! core (`filled_quantity`, `status`). Time priority is carried by a
//! monotonic admission sequence rather than a wall-clock timestamp, so
//! two orders can never tie.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order_type::OrderType;
use crate::side::Side;

/// Lifecycle state of an order. `Filled` and `Cancelled` are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// Caller-supplied submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_id: String,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// A single order as tracked by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub order_id: String,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    /// Absent for market orders; a price supplied with one is ignored.
    pub limit_price: Option<Decimal>,
    /// Monotonic admission sequence; FIFO tiebreak within a price level.
    pub seq: u64,
    pub filled_quantity: Decimal,
    pub status: OrderStatus,
}

impl Order {
    /// Build an admitted order from a validated request.
    pub fn new(req: OrderRequest, seq: u64) -> Self {
        let limit_price = if req.order_type.uses_boundary() {
            req.price
        } else {
            None
        };
        Order {
            order_id: req.order_id,
            symbol: req.symbol,
            side: req.side,
            order_type: req.order_type,
            quantity: req.quantity,
            limit_price,
            seq,
            filled_quantity: Decimal::ZERO,
            status: OrderStatus::Pending,
        }
    }

    /// Quantity still unmatched.
    pub fn remaining(&self) -> Decimal {
        self.quantity - self.filled_quantity
    }

    pub fn is_filled(&self) -> bool {
        self.filled_quantity >= self.quantity
    }

    /// Record an execution against this order.
    pub(crate) fn fill(&mut self, qty: Decimal) {
        debug_assert!(qty > Decimal::ZERO && qty <= self.remaining());
        self.filled_quantity += qty;
        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
    }
}
