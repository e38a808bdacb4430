//! Engine facade: per-symbol books, policy dispatch, trade log, stats.
//!
//! One explicitly constructed instance owns all venue state; the API
//! layer receives it by reference. Each submission is one atomic unit
//! under its symbol's lock (validate, match, mutate book, append trades,
//! update counters); submissions for different symbols proceed in
//! parallel because their books are independent.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::book::{Bbo, OrderBook};
use crate::error::EngineError;
use crate::matching;
use crate::order::{Order, OrderRequest, OrderStatus};
use crate::order_type::RemainderPolicy;
use crate::side::Side;
use crate::stats::{EngineStats, StatsTracker};
use crate::trade::{Trade, TradeLog};
use crate::validate;

/// Result of an admitted submission: the order's final status and every
/// trade it produced, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub order_id: String,
    pub status: OrderStatus,
    pub trades: Vec<Trade>,
}

/// Consistent point-in-time view of one symbol's book.
#[derive(Debug, Clone, Serialize)]
pub struct BookSnapshot {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    /// `(price, quantity)` best-first, truncated to the requested depth.
    pub bids: Vec<(Decimal, Decimal)>,
    pub asks: Vec<(Decimal, Decimal)>,
    pub bbo: Bbo,
}

/// The matching venue: order books keyed by symbol, an append-only trade
/// log and running stats.
#[derive(Debug, Default)]
pub struct Engine {
    /// Symbol -> book. The outer map only grows; each book carries its
    /// own lock so one symbol's matching never blocks another's.
    books: RwLock<HashMap<String, Arc<Mutex<OrderBook>>>>,

    /// Every order id ever admitted; duplicates are rejected.
    seen_order_ids: Mutex<HashSet<String>>,

    trade_log: TradeLog,
    stats: StatsTracker,

    /// Admission sequence; FIFO tiebreak within a price level.
    admission_seq: AtomicU64,
    trade_seq: AtomicU64,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    /// Submit an order: validate, match under the symbol's lock, record
    /// trades and stats, and return the synchronous result.
    pub fn submit(&self, req: OrderRequest) -> Result<Submission, EngineError> {
        validate::validate(&req)?;
        self.claim_order_id(&req.order_id)?;

        let seq = self.admission_seq.fetch_add(1, Ordering::Relaxed);
        let mut order = Order::new(req, seq);
        self.stats.record_order();

        let book = self.book_for(&order.symbol);
        let trades = {
            let mut book = book.lock();
            self.apply_policy(&mut book, &mut order)
        };

        self.trade_log.append(&trades);
        self.stats.record_trades(&trades);

        Ok(Submission {
            order_id: order.order_id,
            status: order.status,
            trades,
        })
    }

    /// Book snapshot for one symbol. An unknown symbol yields empty
    /// sides rather than an error.
    pub fn order_book(&self, symbol: &str, depth: usize) -> BookSnapshot {
        let book = self.books.read().get(symbol).cloned();
        let (bids, asks, bbo) = match book {
            Some(book) => {
                let book = book.lock();
                (
                    book.depth(Side::Buy, depth),
                    book.depth(Side::Sell, depth),
                    book.bbo(),
                )
            }
            None => (Vec::new(), Vec::new(), Bbo::default()),
        };
        BookSnapshot {
            timestamp: Utc::now(),
            symbol: symbol.to_string(),
            bids,
            asks,
            bbo,
        }
    }

    /// The most recent `limit` trades across all symbols,
    /// most-recent-first.
    pub fn recent_trades(&self, limit: usize) -> Vec<Trade> {
        self.trade_log.recent(limit)
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.snapshot()
    }

    /// Forwarded to the stats tracker; driven by the caller's periodic
    /// task, independent of the submission path.
    pub fn tick_throughput(&self, elapsed: Duration) {
        self.stats.tick_throughput(elapsed);
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    /// Run the order's execution policy against its symbol's book.
    fn apply_policy(&self, book: &mut OrderBook, order: &mut Order) -> Vec<Trade> {
        let boundary = if order.order_type.uses_boundary() {
            order.limit_price
        } else {
            None
        };
        let policy = order.order_type.remainder_policy();

        // Fill-or-kill: the feasibility scan and the execution sit under
        // the same symbol lock, so the guarantee cannot be invalidated
        // by a concurrent submission.
        if policy == RemainderPolicy::RejectIfIncomplete
            && !book.eligible_quantity_reaches(order.side, boundary, order.quantity)
        {
            order.status = OrderStatus::Cancelled;
            return Vec::new();
        }

        let trades = matching::consume_liquidity(book, order, boundary, || {
            let n = self.trade_seq.fetch_add(1, Ordering::Relaxed) + 1;
            format!("T-{n}")
        });

        match policy {
            RemainderPolicy::Rest => {
                // A fully resting order keeps its Pending status; a
                // partial fill already moved it to PartiallyFilled.
                if !order.is_filled() {
                    book.insert(order.clone());
                }
            }
            RemainderPolicy::Discard => {
                if !order.is_filled() {
                    order.status = if order.filled_quantity > Decimal::ZERO {
                        OrderStatus::PartiallyFilled
                    } else {
                        OrderStatus::Cancelled
                    };
                }
            }
            RemainderPolicy::RejectIfIncomplete => {
                debug_assert!(
                    order.is_filled(),
                    "fill-or-kill pre-check guaranteed a full fill"
                );
            }
        }

        trades
    }

    fn book_for(&self, symbol: &str) -> Arc<Mutex<OrderBook>> {
        if let Some(book) = self.books.read().get(symbol) {
            return book.clone();
        }
        let mut books = self.books.write();
        books
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(OrderBook::new(symbol))))
            .clone()
    }

    fn claim_order_id(&self, order_id: &str) -> Result<(), EngineError> {
        let mut seen = self.seen_order_ids.lock();
        if !seen.insert(order_id.to_string()) {
            return Err(EngineError::DuplicateOrderId {
                order_id: order_id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_type::OrderType;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn limit(id: &str, side: Side, qty: &str, price: &str) -> OrderRequest {
        OrderRequest {
            order_id: id.into(),
            symbol: "BTC-USDT".into(),
            side,
            order_type: OrderType::Limit,
            quantity: d(qty),
            price: Some(d(price)),
        }
    }

    #[test]
    fn resting_limit_order_stays_pending() {
        let engine = Engine::new();
        let result = engine.submit(limit("b1", Side::Buy, "1.0", "49900")).unwrap();

        assert_eq!(result.status, OrderStatus::Pending);
        assert!(result.trades.is_empty());

        let snapshot = engine.order_book("BTC-USDT", 10);
        assert_eq!(snapshot.bids, vec![(d("49900"), d("1.0"))]);
        assert_eq!(snapshot.bbo.best_bid, Some(d("49900")));
    }

    #[test]
    fn validation_failure_counts_nothing() {
        let engine = Engine::new();
        let mut req = limit("bad", Side::Buy, "0", "49900");
        req.quantity = Decimal::ZERO;

        let err = engine.submit(req).unwrap_err();
        assert_eq!(err.order_id(), "bad");
        assert_eq!(engine.stats().total_orders, 0);
        assert!(engine.order_book("BTC-USDT", 10).bids.is_empty());
    }

    #[test]
    fn duplicate_order_id_is_rejected_without_mutation() {
        let engine = Engine::new();
        engine.submit(limit("o1", Side::Buy, "1.0", "49900")).unwrap();

        let err = engine.submit(limit("o1", Side::Sell, "1.0", "50100")).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateOrderId {
                order_id: "o1".into()
            }
        );
        assert_eq!(engine.stats().total_orders, 1);
        assert!(engine.order_book("BTC-USDT", 10).asks.is_empty());
    }

    #[test]
    fn unknown_symbol_snapshot_is_empty() {
        let engine = Engine::new();
        let snapshot = engine.order_book("ETH-USDT", 10);
        assert!(snapshot.bids.is_empty());
        assert!(snapshot.asks.is_empty());
        assert_eq!(snapshot.bbo, Bbo::default());
    }

    #[test]
    fn symbols_have_independent_books() {
        let engine = Engine::new();
        engine.submit(limit("btc-bid", Side::Buy, "1.0", "50000")).unwrap();

        let mut eth_sell = limit("eth-ask", Side::Sell, "1.0", "49000");
        eth_sell.symbol = "ETH-USDT".into();
        let result = engine.submit(eth_sell).unwrap();

        // A crossing price in another symbol must not trade.
        assert!(result.trades.is_empty());
        assert_eq!(result.status, OrderStatus::Pending);
        assert_eq!(engine.order_book("BTC-USDT", 10).bids.len(), 1);
        assert_eq!(engine.order_book("ETH-USDT", 10).asks.len(), 1);
    }

    #[test]
    fn trade_ids_are_unique_and_sequential() {
        let engine = Engine::new();
        engine.submit(limit("m1", Side::Sell, "1.0", "50000")).unwrap();
        engine.submit(limit("m2", Side::Sell, "1.0", "50000")).unwrap();
        let result = engine.submit(limit("t1", Side::Buy, "2.0", "50000")).unwrap();

        let ids: Vec<_> = result.trades.iter().map(|t| t.trade_id.as_str()).collect();
        assert_eq!(ids, vec!["T-1", "T-2"]);
    }
}
