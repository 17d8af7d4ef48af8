//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::{stage_label, EventKind, EventRecord};
use crate::summary::{summarize, SaleSummary};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct BuyerPurchasesResponse {
    pub buyer: String,
    pub count: usize,
    pub purchases: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct StageEntry {
    pub stage: Option<i64>,
    pub label: Option<&'static str>,
    pub ledger: i64,
    pub timestamp: i64,
    pub tx_hash: Option<String>,
}

#[derive(Serialize)]
pub struct StagesResponse {
    pub count: usize,
    pub stages: Vec<StageEntry>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for IndexerError {
    fn into_response(self) -> Response {
        error!("API request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, IndexerError>;

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> ApiResult<EventsResponse> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(EventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /buyers/:address/purchases`
pub async fn get_buyer_purchases(
    State(state): State<Arc<ApiState>>,
    Path(buyer): Path<String>,
) -> ApiResult<BuyerPurchasesResponse> {
    let purchases = db::get_purchases_for_buyer(&state.pool, &buyer).await?;
    Ok(Json(BuyerPurchasesResponse {
        buyer,
        count: purchases.len(),
        purchases,
    }))
}

/// `GET /stages`
///
/// Stage transitions in the order they happened, with their display labels.
pub async fn get_stage_history(State(state): State<Arc<ApiState>>) -> ApiResult<StagesResponse> {
    let stages: Vec<StageEntry> = db::get_events_of_kind(&state.pool, EventKind::StageChanged)
        .await?
        .into_iter()
        .map(|ev| StageEntry {
            stage: ev.stage,
            label: ev.stage.and_then(stage_label),
            ledger: ev.ledger,
            timestamp: ev.timestamp,
            tx_hash: ev.tx_hash,
        })
        .collect();
    Ok(Json(StagesResponse {
        count: stages.len(),
        stages,
    }))
}

/// `GET /summary`
pub async fn get_summary(State(state): State<Arc<ApiState>>) -> ApiResult<SaleSummary> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(summarize(&events)))
}
