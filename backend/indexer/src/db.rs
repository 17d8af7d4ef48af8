//! Database layer: migrations, cursor persistence and sale event queries.

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use crate::errors::Result;
use crate::events::{EventKind, EventRecord, SaleEvent};

const EVENT_COLUMNS: &str = "id, event_id, event_type, subject, actor, stage, amount, \
     token_amount, ledger, timestamp, contract_id, tx_hash, created_at";

/// Open the SQLite pool and apply pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    // Every connection to `:memory:` would otherwise see its own empty database.
    let max_connections = if url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// Cursor
// ─────────────────────────────────────────────────────────

/// Saved resume point of the indexer loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub last_ledger: i64,
    pub last_cursor: Option<String>,
}

pub async fn load_cursor(pool: &SqlitePool) -> Result<Cursor> {
    let row: Option<(i64, Option<String>)> =
        sqlx::query_as("SELECT last_ledger, last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row
        .map(|(last_ledger, last_cursor)| Cursor {
            last_ledger,
            last_cursor,
        })
        .unwrap_or_default())
}

pub async fn save_cursor(pool: &SqlitePool, cursor: &Cursor) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(cursor.last_ledger)
        .bind(cursor.last_cursor.as_deref())
        .execute(pool)
        .await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Writes
// ─────────────────────────────────────────────────────────

/// Store a batch of decoded events inside one transaction.
///
/// Rows are keyed by the RPC event id, so re-polling an overlapping ledger
/// range stores nothing twice. Returns the number of new rows.
pub async fn insert_events(pool: &SqlitePool, events: &[SaleEvent]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_id, event_type, subject, actor, stage, amount, token_amount,
                 ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&ev.event_id)
        .bind(&ev.event_type)
        .bind(&ev.subject)
        .bind(&ev.actor)
        .bind(ev.stage)
        .bind(&ev.amount)
        .bind(&ev.token_amount)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    tx.commit().await?;
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Reads
// ─────────────────────────────────────────────────────────

/// Every indexed event, oldest first.
pub async fn get_all_events(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY ledger ASC, id ASC");
    Ok(sqlx::query_as::<_, EventRecord>(&sql)
        .fetch_all(pool)
        .await?)
}

/// Events of a single kind, oldest first.
pub async fn get_events_of_kind(pool: &SqlitePool, kind: EventKind) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE event_type = ?1 ORDER BY ledger ASC, id ASC"
    );
    Ok(sqlx::query_as::<_, EventRecord>(&sql)
        .bind(kind.as_str())
        .fetch_all(pool)
        .await?)
}

/// Purchases made by one buyer address.
pub async fn get_purchases_for_buyer(pool: &SqlitePool, buyer: &str) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events \
         WHERE event_type = ?1 AND actor = ?2 ORDER BY ledger ASC, id ASC"
    );
    Ok(sqlx::query_as::<_, EventRecord>(&sql)
        .bind(EventKind::TokensPurchased.as_str())
        .bind(buyer)
        .fetch_all(pool)
        .await?)
}
