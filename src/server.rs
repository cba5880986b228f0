use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::aggregate::Aggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
    pub registry: prometheus::Registry,
}

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/eshop/us", axum::routing::get(eshop_us))
        .route("/metrics", axum::routing::get(metrics))
        .with_state(state)
}

#[tracing::instrument(skip(state))]
async fn eshop_us(State(state): State<AppState>) -> Response {
    let games = match state.aggregator.collect().await {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("Collecting Games {:?}", e);

            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let body = match serde_json::to_string(&games) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Serializing Games {:?}", e);

            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    state.aggregator.metrics().listing_served(games.len());

    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
async fn metrics(State(state): State<AppState>) -> String {
    tracing::trace!("Getting metrics");

    let encoder = prometheus::TextEncoder::new();
    let metrics_families = state.registry.gather();
    match encoder.encode_to_string(&metrics_families) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Encoding Metrics {:?}", e);

            String::new()
        }
    }
}
