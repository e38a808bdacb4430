//! HTTP routes translating network requests into engine calls.
//!
//! The engine performs no network I/O itself; these handlers validate
//! nothing beyond JSON shape (the engine owns structural validation)
//! and, after each mutating call, hand the resulting snapshots to the
//! broadcaster.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use venue_core::{BookSnapshot, EngineStats, OrderRequest, Trade};

use crate::broadcast::Update;
use crate::state::AppState;

const DEFAULT_SYMBOL: &str = "BTC-USDT";
const DEFAULT_DEPTH: usize = 10;
const DEFAULT_TRADE_LIMIT: usize = 50;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", post(submit_order))
        .route("/api/orderbook", get(order_book))
        .route("/api/trades", get(recent_trades))
        .route("/api/stats", get(stats))
        .route("/api/updates", get(recent_updates))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    status: &'static str,
    order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// Present on success, empty when the order produced no trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    trades: Option<Vec<Trade>>,
}

async fn submit_order(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> Json<SubmitResponse> {
    let symbol = req.symbol.clone();
    match state.engine.submit(req) {
        Ok(submission) => {
            publish_after_submit(&state, &symbol, &submission.trades);
            Json(SubmitResponse {
                status: "success",
                order_id: submission.order_id,
                message: None,
                trades: Some(submission.trades),
            })
        }
        Err(err) => {
            tracing::warn!(order_id = err.order_id(), "order rejected: {err}");
            Json(SubmitResponse {
                status: "error",
                order_id: err.order_id().to_string(),
                message: Some(err.to_string()),
                trades: None,
            })
        }
    }
}

/// Fan out the post-submission snapshots: fresh book for the symbol,
/// each produced trade, then the updated stats.
fn publish_after_submit(state: &AppState, symbol: &str, trades: &[Trade]) {
    let book = state.engine.order_book(symbol, DEFAULT_DEPTH);
    state.broadcaster.publish("orderbook_update", book);
    for trade in trades {
        state.broadcaster.publish("trade_execution", trade);
    }
    state.broadcaster.publish("stats_update", state.engine.stats());
}

#[derive(Debug, Deserialize)]
struct BookQuery {
    symbol: Option<String>,
    depth: Option<usize>,
}

async fn order_book(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Json<BookSnapshot> {
    let symbol = query.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    let depth = query.depth.unwrap_or(DEFAULT_DEPTH);
    Json(state.engine.order_book(&symbol, depth))
}

#[derive(Debug, Deserialize)]
struct TradesQuery {
    limit: Option<usize>,
}

async fn recent_trades(
    State(state): State<AppState>,
    Query(query): Query<TradesQuery>,
) -> Json<Vec<Trade>> {
    Json(state.engine.recent_trades(query.limit.unwrap_or(DEFAULT_TRADE_LIMIT)))
}

async fn stats(State(state): State<AppState>) -> Json<EngineStats> {
    Json(state.engine.stats())
}

#[derive(Debug, Deserialize)]
struct UpdatesQuery {
    kind: Option<String>,
}

async fn recent_updates(
    State(state): State<AppState>,
    Query(query): Query<UpdatesQuery>,
) -> Json<Vec<Update>> {
    Json(state.broadcaster.recent(query.kind.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;
    use venue_core::Engine;

    fn make_app() -> (Router, AppState) {
        let state = AppState::new(Arc::new(Engine::new()));
        (router(state.clone()), state)
    }

    fn post_order(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/orders")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn submit_and_read_back_order_book() {
        let (app, state) = make_app();

        let response = app
            .clone()
            .oneshot(post_order(serde_json::json!({
                "order_id": "b1",
                "symbol": "BTC-USDT",
                "side": "buy",
                "order_type": "limit",
                "quantity": "1.0",
                "price": "49900"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["order_id"], "b1");
        assert_eq!(body["trades"], serde_json::json!([]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/orderbook?symbol=BTC-USDT&depth=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["symbol"], "BTC-USDT");
        assert_eq!(body["bids"][0][0], "49900");
        assert_eq!(body["bbo"]["best_bid"], "49900");

        // The submission was broadcast as book + stats updates.
        let recorded = state.broadcaster.recent(None);
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].kind, "orderbook_update");
        assert_eq!(recorded[1].kind, "stats_update");
    }

    #[tokio::test]
    async fn invalid_order_maps_to_error_response() {
        let (app, state) = make_app();

        let response = app
            .oneshot(post_order(serde_json::json!({
                "order_id": "bad",
                "symbol": "BTC-USDT",
                "side": "sell",
                "order_type": "limit",
                "quantity": "-1"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["order_id"], "bad");
        assert!(body["message"].as_str().unwrap().contains("quantity"));
        assert!(body.get("trades").is_none());

        // Nothing was broadcast for a rejected submission.
        assert!(state.broadcaster.recent(None).is_empty());
    }

    #[tokio::test]
    async fn matching_submission_broadcasts_trades_and_reports_stats() {
        let (app, _state) = make_app();

        for body in [
            serde_json::json!({
                "order_id": "s1", "symbol": "BTC-USDT", "side": "sell",
                "order_type": "limit", "quantity": "1.0", "price": "50000"
            }),
            serde_json::json!({
                "order_id": "b1", "symbol": "BTC-USDT", "side": "buy",
                "order_type": "limit", "quantity": "1.0", "price": "50000"
            }),
        ] {
            let response = app.clone().oneshot(post_order(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/trades?limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let trades = json_body(response).await;
        assert_eq!(trades.as_array().unwrap().len(), 1);
        assert_eq!(trades[0]["price"], "50000");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let stats = json_body(response).await;
        assert_eq!(stats["total_orders"], 2);
        assert_eq!(stats["total_trades"], 1);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/updates?kind=trade_execution")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let updates = json_body(response).await;
        assert_eq!(updates.as_array().unwrap().len(), 1);
    }
}
