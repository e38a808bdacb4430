//! Synthetic demo order flow.
//!
//! Purely a client of the engine's submit operation: seeds a small
//! liquidity ladder, then submits one randomized order per second.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use venue_core::{Engine, OrderRequest, OrderType, Side};

const DEMO_SYMBOL: &str = "BTC-USDT";

pub async fn run_demo_flow(engine: Arc<Engine>) {
    seed_liquidity(&engine);

    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut n: u64 = 0;

    loop {
        ticker.tick().await;
        n += 1;
        match engine.submit(random_order(&mut rng, n)) {
            Ok(submission) => tracing::debug!(
                order_id = %submission.order_id,
                status = ?submission.status,
                trades = submission.trades.len(),
                "demo order"
            ),
            Err(err) => tracing::warn!("demo order rejected: {err}"),
        }
    }
}

/// Rest a ladder of limit orders on both sides of 50 000.
fn seed_liquidity(engine: &Engine) {
    // (side, quantity in tenths, price)
    let ladder: [(Side, i64, i64); 8] = [
        (Side::Buy, 10, 49_900),
        (Side::Buy, 20, 49_950),
        (Side::Buy, 5, 50_000),
        (Side::Buy, 15, 49_850),
        (Side::Sell, 15, 50_100),
        (Side::Sell, 10, 50_050),
        (Side::Sell, 20, 50_150),
        (Side::Sell, 8, 50_200),
    ];

    for (i, (side, qty_tenths, price)) in ladder.into_iter().enumerate() {
        let req = OrderRequest {
            order_id: format!("liquidity-{i}"),
            symbol: DEMO_SYMBOL.to_string(),
            side,
            order_type: OrderType::Limit,
            quantity: Decimal::new(qty_tenths, 1),
            price: Some(Decimal::new(price, 0)),
        };
        if let Err(err) = engine.submit(req) {
            tracing::warn!("liquidity seed rejected: {err}");
        }
    }
}

fn random_order(rng: &mut StdRng, n: u64) -> OrderRequest {
    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
    let order_type = match rng.gen_range(0..3) {
        0 => OrderType::Limit,
        1 => OrderType::Market,
        _ => OrderType::Ioc,
    };

    // Price in cents around 50 000.00, +/- 250.00.
    let price_cents = rng.gen_range(4_975_000i64..=5_025_000);
    // Quantity between 0.1000 and 2.1000.
    let qty_units = rng.gen_range(1_000i64..=21_000);

    OrderRequest {
        order_id: format!("demo-{n}"),
        symbol: DEMO_SYMBOL.to_string(),
        side,
        order_type,
        quantity: Decimal::new(qty_units, 4),
        price: (order_type != OrderType::Market).then(|| Decimal::new(price_cents, 2)),
    }
}
