//! Single-symbol order book with price-time priority.
//!
//! - One instance per symbol.
//! - Bids: best = highest price; asks: best = lowest price.
//! - FIFO within each price level (admission-sequence order).
//!
//! Levels key a `BTreeMap` by `Decimal` price, so priority ordering is
//! derived from the map at query/match time rather than stored. A level
//! whose aggregate quantity reaches zero is removed immediately; the
//! book never retains empty levels.

use std::collections::{BTreeMap, VecDeque};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::order::Order;
use crate::side::Side;

/// Derived best bid and offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bbo {
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub spread: Option<Decimal>,
}

/// All resting orders at one price, in FIFO order, with a cached
/// aggregate of their remaining quantities.
#[derive(Debug, Default)]
pub struct PriceLevel {
    orders: VecDeque<Order>,
    total_quantity: Decimal,
}

impl PriceLevel {
    fn push(&mut self, order: Order) {
        self.total_quantity += order.remaining();
        self.orders.push_back(order);
    }

    /// Remove a specific resting order by id, recomputing the aggregate.
    fn remove(&mut self, order_id: &str) -> Option<Order> {
        let idx = self.orders.iter().position(|o| o.order_id == order_id)?;
        let order = self.orders.remove(idx)?;
        self.total_quantity -= order.remaining();
        debug_assert!(self.total_quantity >= Decimal::ZERO);
        Some(order)
    }

    /// Oldest resting order at this price.
    pub(crate) fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Drop the front maker after it has been fully filled.
    pub(crate) fn evict_front(&mut self) {
        let evicted = self.orders.pop_front();
        debug_assert!(evicted.is_some_and(|o| o.is_filled()));
    }

    /// Account for `qty` traded out of this level's aggregate.
    pub(crate) fn reduce(&mut self, qty: Decimal) {
        self.total_quantity -= qty;
        assert!(
            self.total_quantity >= Decimal::ZERO,
            "price level aggregate went negative"
        );
    }

    pub fn total_quantity(&self) -> Decimal {
        self.total_quantity
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Two-sided ladder of price levels for one symbol.
#[derive(Debug)]
pub struct OrderBook {
    symbol: String,

    /// Bids: price -> level; highest key is the best bid.
    bids: BTreeMap<Decimal, PriceLevel>,

    /// Asks: price -> level; lowest key is the best ask.
    asks: BTreeMap<Decimal, PriceLevel>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        OrderBook {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Rest an order (or remainder) at its limit price, after any
    /// existing residents at that price.
    pub fn insert(&mut self, order: Order) {
        let price = order
            .limit_price
            .expect("resting order requires a limit price");
        self.side_levels_mut(order.side)
            .entry(price)
            .or_default()
            .push(order);
    }

    /// Remove a specific resting order from its level, deleting the
    /// level if it becomes empty.
    pub fn remove(&mut self, side: Side, price: Decimal, order_id: &str) -> Option<Order> {
        let levels = self.side_levels_mut(side);
        let level = levels.get_mut(&price)?;
        let removed = level.remove(order_id);
        if level.is_empty() {
            levels.remove(&price);
        }
        removed
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    pub fn bbo(&self) -> Bbo {
        let best_bid = self.best_bid();
        let best_ask = self.best_ask();
        let spread = match (best_bid, best_ask) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        };
        Bbo {
            best_bid,
            best_ask,
            spread,
        }
    }

    /// `(price, aggregate_qty)` pairs for one side, best-first,
    /// truncated to `depth` levels.
    pub fn depth(&self, side: Side, depth: usize) -> Vec<(Decimal, Decimal)> {
        let pair = |(price, level): (&Decimal, &PriceLevel)| (*price, level.total_quantity());
        match side {
            Side::Buy => self.bids.iter().rev().take(depth).map(pair).collect(),
            Side::Sell => self.asks.iter().take(depth).map(pair).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    // -------------------------------------------------------------------------
    // Matching-side accessors
    // -------------------------------------------------------------------------

    /// The best opposite-side price a taker may trade at, if any level
    /// satisfies the boundary.
    pub(crate) fn best_eligible(
        &self,
        taker_side: Side,
        boundary: Option<Decimal>,
    ) -> Option<Decimal> {
        match taker_side {
            Side::Buy => {
                let best = self.best_ask()?;
                (boundary.is_none_or(|limit| best <= limit)).then_some(best)
            }
            Side::Sell => {
                let best = self.best_bid()?;
                (boundary.is_none_or(|limit| best >= limit)).then_some(best)
            }
        }
    }

    /// Whether eligible opposite-side liquidity reaches `target`
    /// (fill-or-kill pre-check). Walks levels in priority order and
    /// stops as soon as the running sum suffices.
    pub(crate) fn eligible_quantity_reaches(
        &self,
        taker_side: Side,
        boundary: Option<Decimal>,
        target: Decimal,
    ) -> bool {
        let mut available = Decimal::ZERO;
        let eligible = |price: &Decimal| match taker_side {
            Side::Buy => boundary.is_none_or(|limit| *price <= limit),
            Side::Sell => boundary.is_none_or(|limit| *price >= limit),
        };
        let levels: Box<dyn Iterator<Item = (&Decimal, &PriceLevel)>> = match taker_side {
            Side::Buy => Box::new(self.asks.iter()),
            Side::Sell => Box::new(self.bids.iter().rev()),
        };
        for (price, level) in levels {
            if !eligible(price) {
                break;
            }
            available += level.total_quantity();
            if available >= target {
                return true;
            }
        }
        false
    }

    pub(crate) fn opposite_level_mut(
        &mut self,
        taker_side: Side,
        price: Decimal,
    ) -> Option<&mut PriceLevel> {
        self.side_levels_mut(taker_side.opposite()).get_mut(&price)
    }

    /// Drop an opposite-side level once matching has emptied it.
    pub(crate) fn remove_empty_opposite_level(&mut self, taker_side: Side, price: Decimal) {
        let levels = self.side_levels_mut(taker_side.opposite());
        debug_assert!(levels.get(&price).is_some_and(PriceLevel::is_empty));
        levels.remove(&price);
    }

    fn side_levels_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
