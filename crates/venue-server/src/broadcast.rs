//! Update recorder and fan-out.
//!
//! After each mutating call the API layer publishes book/trade/stats
//! snapshots here. The broadcaster records the most recent updates for
//! polling and forwards each one to live subscribers; the engine itself
//! has no subscription concept.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;

/// Kept updates for the polling surface.
const RECENT_CAPACITY: usize = 100;

/// Fan-out channel capacity; slow subscribers lag rather than block.
const CHANNEL_CAPACITY: usize = 256;

/// One published update: a kind tag plus its JSON payload.
#[derive(Debug, Clone, Serialize)]
pub struct Update {
    pub kind: String,
    pub data: serde_json::Value,
}

pub struct Broadcaster {
    tx: broadcast::Sender<Update>,
    recent: Mutex<VecDeque<Update>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Broadcaster {
            tx,
            recent: Mutex::new(VecDeque::with_capacity(RECENT_CAPACITY)),
        }
    }

    /// Record an update and forward it to current subscribers.
    pub fn publish(&self, kind: &str, data: impl Serialize) {
        let data = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(kind, "failed to serialize update: {err}");
                return;
            }
        };
        let update = Update {
            kind: kind.to_string(),
            data,
        };

        {
            let mut recent = self.recent.lock();
            if recent.len() == RECENT_CAPACITY {
                recent.pop_front();
            }
            recent.push_back(update.clone());
        }

        // No live subscribers is fine; the update is still recorded.
        let _ = self.tx.send(update);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Update> {
        self.tx.subscribe()
    }

    /// Recorded updates, oldest first, optionally filtered by kind.
    pub fn recent(&self, kind: Option<&str>) -> Vec<Update> {
        let recent = self.recent.lock();
        recent
            .iter()
            .filter(|u| kind.is_none_or(|k| u.kind == k))
            .cloned()
            .collect()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Broadcaster::new()
    }
}
