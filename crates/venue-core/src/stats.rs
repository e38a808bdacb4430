//! Running engine counters and throughput tracking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::trade::Trade;

/// Point-in-time stats snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub total_orders: u64,
    pub total_trades: u64,
    /// Lifetime cumulative notional (sum of price x quantity), never reset.
    pub volume: Decimal,
    pub orders_per_second: f64,
}

/// Monotonic counters plus a periodically recomputed throughput rate.
///
/// Counter updates come from concurrent submissions; the throughput
/// recomputation is driven by an external periodic tick and never blocks
/// (or is blocked by) order processing.
#[derive(Debug, Default)]
pub struct StatsTracker {
    total_orders: AtomicU64,
    total_trades: AtomicU64,
    /// Orders admitted since the last throughput tick.
    interval_orders: AtomicU64,
    /// f64 bit pattern; written only by the throughput tick.
    orders_per_second_bits: AtomicU64,
    volume: Mutex<Decimal>,
}

impl StatsTracker {
    pub fn new() -> Self {
        StatsTracker::default()
    }

    /// One order admitted past validation, regardless of fill outcome.
    pub fn record_order(&self) {
        self.total_orders.fetch_add(1, Ordering::Relaxed);
        self.interval_orders.fetch_add(1, Ordering::Relaxed);
    }

    /// One trade batch produced by a submission.
    pub fn record_trades(&self, batch: &[Trade]) {
        if batch.is_empty() {
            return;
        }
        self.total_trades
            .fetch_add(batch.len() as u64, Ordering::Relaxed);
        let notional = batch
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc + t.price * t.quantity);
        *self.volume.lock() += notional;
    }

    /// Recompute orders-per-second from the interval counter, then reset
    /// it. Called by the periodic throughput task.
    pub fn tick_throughput(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        if secs <= 0.0 {
            return;
        }
        let admitted = self.interval_orders.swap(0, Ordering::Relaxed);
        let rate = admitted as f64 / secs;
        self.orders_per_second_bits
            .store(rate.to_bits(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> EngineStats {
        EngineStats {
            total_orders: self.total_orders.load(Ordering::Relaxed),
            total_trades: self.total_trades.load(Ordering::Relaxed),
            volume: *self.volume.lock(),
            orders_per_second: f64::from_bits(
                self.orders_per_second_bits.load(Ordering::Relaxed),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Side;
    use chrono::Utc;

    fn trade(price: &str, qty: &str) -> Trade {
        Trade {
            trade_id: "T-1".into(),
            symbol: "BTC-USDT".into(),
            price: price.parse().unwrap(),
            quantity: qty.parse().unwrap(),
            executed_at: Utc::now(),
            aggressor_side: Side::Buy,
            maker_order_id: "m".into(),
            taker_order_id: "t".into(),
        }
    }

    #[test]
    fn counters_accumulate() {
        let stats = StatsTracker::new();
        stats.record_order();
        stats.record_order();
        stats.record_trades(&[trade("50000", "1.0"), trade("50100", "0.5")]);
        stats.record_trades(&[]);

        let snap = stats.snapshot();
        assert_eq!(snap.total_orders, 2);
        assert_eq!(snap.total_trades, 2);
        assert_eq!(snap.volume, "75050.0".parse().unwrap());
    }

    #[test]
    fn tick_recomputes_rate_and_resets_interval() {
        let stats = StatsTracker::new();
        for _ in 0..10 {
            stats.record_order();
        }

        stats.tick_throughput(Duration::from_secs(2));
        assert_eq!(stats.snapshot().orders_per_second, 5.0);

        // Interval counter was reset; an idle tick drops the rate to zero.
        stats.tick_throughput(Duration::from_secs(1));
        assert_eq!(stats.snapshot().orders_per_second, 0.0);

        // Lifetime counters are untouched by ticks.
        assert_eq!(stats.snapshot().total_orders, 10);
    }

    #[test]
    fn zero_elapsed_tick_is_ignored() {
        let stats = StatsTracker::new();
        stats.record_order();
        stats.tick_throughput(Duration::ZERO);
        assert_eq!(stats.snapshot().orders_per_second, 0.0);
    }
}
