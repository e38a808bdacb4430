//! The matching core.
//!
//! One primitive shared by all four order types: consume resting
//! liquidity against an incoming taker under an optional price boundary
//! until the taker is satisfied or no eligible level remains. Policies
//! differ only in boundary presence and remainder disposition, which the
//! engine applies around this routine.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::book::OrderBook;
use crate::order::Order;
use crate::trade::Trade;

/// Match `taker` against the opposite side of `book`.
///
/// Walks eligible levels best-first; within a level, consumes makers in
/// FIFO order with `trade_qty = min(taker_remaining, maker_remaining)`,
/// emitting each trade at the maker's level price. Fully filled makers
/// are evicted and an emptied level is removed from the book. Halts when
/// the taker's remainder reaches zero or no eligible level remains; the
/// unmatched remainder is left on the taker.
pub(crate) fn consume_liquidity<F>(
    book: &mut OrderBook,
    taker: &mut Order,
    boundary: Option<Decimal>,
    mut next_trade_id: F,
) -> Vec<Trade>
where
    F: FnMut() -> String,
{
    let mut trades = Vec::new();

    while !taker.is_filled() {
        let Some(level_price) = book.best_eligible(taker.side, boundary) else {
            break;
        };

        let level = book
            .opposite_level_mut(taker.side, level_price)
            .expect("best eligible price has no level");

        while taker.remaining() > Decimal::ZERO {
            let Some(maker) = level.front_mut() else {
                break;
            };

            let trade_qty = taker.remaining().min(maker.remaining());
            maker.fill(trade_qty);
            taker.fill(trade_qty);

            trades.push(Trade {
                trade_id: next_trade_id(),
                symbol: taker.symbol.clone(),
                price: level_price,
                quantity: trade_qty,
                executed_at: Utc::now(),
                aggressor_side: taker.side,
                maker_order_id: maker.order_id.clone(),
                taker_order_id: taker.order_id.clone(),
            });

            let maker_done = maker.is_filled();
            level.reduce(trade_qty);
            if maker_done {
                level.evict_front();
            }
        }

        let emptied = level.is_empty();
        if emptied {
            book.remove_empty_opposite_level(taker.side, level_price);
        }
    }

    trades
}
