//! Background task: poll the RPC, decode sale events, store them.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::{self, Cursor};
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Poll forever; errors are logged and the next tick retries.
pub async fn run(state: Arc<IndexerState>) {
    info!(contract = %state.config.contract_id, "Indexer starting");

    let mut cursor = match db::load_cursor(&state.pool).await {
        Ok(saved) => saved,
        Err(e) => {
            warn!("Could not load saved cursor, starting fresh: {e}");
            Cursor::default()
        }
    };
    if cursor.last_ledger <= 0 {
        cursor.last_ledger = i64::from(state.config.start_ledger);
    }

    info!(ledger = cursor.last_ledger, "Resuming");

    loop {
        match poll_once(&state, &cursor).await {
            Ok(next) => cursor = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// One poll iteration; returns the cursor to resume from.
async fn poll_once(state: &IndexerState, cursor: &Cursor) -> Result<Cursor> {
    let config = &state.config;
    let start_ledger = u32::try_from(cursor.last_ledger).unwrap_or(config.start_ledger);

    let page = rpc::fetch_events(
        &state.client,
        &config.rpc_url,
        &config.contract_id,
        start_ledger,
        cursor.last_cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            raw = page.events.len(),
            stored = inserted,
            "Polled crowdsale events"
        );
    }

    let next = next_cursor(cursor, page.latest_ledger, page.cursor);
    db::save_cursor(&state.pool, &next).await?;
    Ok(next)
}

/// Keep the pagination token when the RPC hands one back; the ledger only
/// ever moves forward.
fn next_cursor(current: &Cursor, latest_ledger: Option<u64>, page_cursor: Option<String>) -> Cursor {
    let latest = latest_ledger
        .and_then(|l| i64::try_from(l).ok())
        .unwrap_or(current.last_ledger);
    Cursor {
        last_ledger: latest.max(current.last_ledger),
        last_cursor: page_cursor.or_else(|| current.last_cursor.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_never_moves_backwards() {
        let current = Cursor {
            last_ledger: 500,
            last_cursor: None,
        };
        assert_eq!(next_cursor(&current, Some(400), None).last_ledger, 500);
        assert_eq!(next_cursor(&current, Some(650), None).last_ledger, 650);
        assert_eq!(next_cursor(&current, None, None).last_ledger, 500);
    }

    #[test]
    fn pagination_token_is_kept_until_replaced() {
        let current = Cursor {
            last_ledger: 10,
            last_cursor: Some("old".to_string()),
        };
        let next = next_cursor(&current, Some(12), None);
        assert_eq!(next.last_cursor.as_deref(), Some("old"));

        let next = next_cursor(&next, Some(12), Some("new".to_string()));
        assert_eq!(next.last_cursor.as_deref(), Some("new"));
    }
}
