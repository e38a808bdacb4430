//! venue-core
//!
//! Pure matching venue logic:
//! - order / trade data model
//! - per-symbol order book with price-time priority
//! - shared matching core behind the four order-type policies
//! - stats tracker and append-only trade log

pub mod book;
pub mod engine;
pub mod error;
pub mod order;
pub mod order_type;
pub mod side;
pub mod stats;
pub mod trade;

mod matching;
mod validate;

pub use book::{Bbo, OrderBook, PriceLevel};
pub use engine::{BookSnapshot, Engine, Submission};
pub use error::EngineError;
pub use order::{Order, OrderRequest, OrderStatus};
pub use order_type::{OrderType, RemainderPolicy};
pub use side::Side;
pub use stats::{EngineStats, StatsTracker};
pub use trade::{Trade, TradeLog};
