//! Order type and its execution policy.
//!
//! All four types share one matching primitive; they differ only in
//! whether matching runs under a price boundary and in what happens to
//! any unmatched remainder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution policy of an incoming order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Match at any available price; remainder is discarded.
    Market,
    /// Match up to the limit price; remainder rests on the book.
    Limit,
    /// Immediate-or-cancel: match up to the limit price, discard the rest.
    Ioc,
    /// Fill-or-kill: fill the entire order now or reject it outright.
    Fok,
}

/// What to do with an unmatched remainder once matching halts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Rest on the book at the order's limit price.
    Rest,
    /// Discard; the remainder never rests.
    Discard,
    /// Reject the whole order up front unless it can fully fill.
    RejectIfIncomplete,
}

impl OrderType {
    /// Whether matching is bounded by the order's limit price.
    ///
    /// Market orders have no boundary; everything else matches only at
    /// prices within its limit.
    pub fn uses_boundary(self) -> bool {
        !matches!(self, OrderType::Market)
    }

    pub fn remainder_policy(self) -> RemainderPolicy {
        match self {
            OrderType::Limit => RemainderPolicy::Rest,
            OrderType::Market | OrderType::Ioc => RemainderPolicy::Discard,
            OrderType::Fok => RemainderPolicy::RejectIfIncomplete,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Ioc => "ioc",
            OrderType::Fok => "fok",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
