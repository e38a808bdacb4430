//! Trade record and append-only execution history.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::side::Side;

/// One execution between a resting maker and an incoming taker.
///
/// `price` is always the maker's level price. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub trade_id: String,
    pub symbol: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub executed_at: DateTime<Utc>,
    /// The taker's side.
    pub aggressor_side: Side,
    pub maker_order_id: String,
    pub taker_order_id: String,
}

/// Append-only record of executed trades, queryable by recency.
#[derive(Debug, Default)]
pub struct TradeLog {
    trades: RwLock<Vec<Trade>>,
}

impl TradeLog {
    pub fn new() -> Self {
        TradeLog::default()
    }

    pub fn append(&self, batch: &[Trade]) {
        if batch.is_empty() {
            return;
        }
        self.trades.write().extend_from_slice(batch);
    }

    /// The most recent `limit` trades, most-recent-first.
    pub fn recent(&self, limit: usize) -> Vec<Trade> {
        let trades = self.trades.read();
        trades.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.trades.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
