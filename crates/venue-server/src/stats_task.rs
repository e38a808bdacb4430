//! Periodic throughput recomputation.
//!
//! The venue's only timed activity: every interval, hand the elapsed
//! wall time to the engine so it can recompute orders-per-second from
//! the interval counter. Runs independently of the submission path.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use venue_core::Engine;

pub async fn run_throughput_task(engine: Arc<Engine>, period: Duration) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately; consume it so every
    // recomputation sees a real elapsed interval.
    ticker.tick().await;
    let mut last = Instant::now();

    loop {
        ticker.tick().await;
        let now = Instant::now();
        engine.tick_throughput(now - last);
        last = now;
    }
}
