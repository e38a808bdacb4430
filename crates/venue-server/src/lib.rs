//! venue-server
//!
//! HTTP/JSON API, update broadcaster and background tasks over the
//! venue core engine.

pub mod broadcast;
pub mod config;
pub mod demo;
pub mod routes;
pub mod state;
pub mod stats_task;
