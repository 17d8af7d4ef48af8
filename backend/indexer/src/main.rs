//! SWAN crowdsale indexer.
//!
//! A background task polls Soroban `getEvents` for the sale contract and
//! stores the decoded events in SQLite. An Axum REST API serves purchases,
//! stage history and a running summary of the sale.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;
mod summary;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::IndexerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crowdsale_indexer=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

    tokio::spawn(indexer::run(Arc::new(IndexerState {
        pool: pool.clone(),
        config: config.clone(),
        client,
    })));

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/events", get(api::get_all_events))
        .route("/buyers/:address/purchases", get(api::get_buyer_purchases))
        .route("/stages", get(api::get_stage_history))
        .route("/summary", get(api::get_summary))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(api::ApiState { pool }));

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
