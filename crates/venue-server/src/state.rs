//! Shared application state handed to every handler.

use std::sync::Arc;

use venue_core::Engine;

use crate::broadcast::Broadcaster;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub broadcaster: Arc<Broadcaster>,
}

impl AppState {
    pub fn new(engine: Arc<Engine>) -> Self {
        AppState {
            engine,
            broadcaster: Arc::new(Broadcaster::new()),
        }
    }
}
