//! Aggregate view of the indexed sale, rebuilt from stored events.

use std::collections::HashSet;

use serde::Serialize;

use crate::events::{stage_label, EventKind, EventRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaleSummary {
    pub purchase_count: usize,
    pub buyer_count: usize,
    /// Sum of payment amounts, as a decimal string (amounts exceed `i64`).
    pub total_raised: String,
    pub tokens_sold: String,
    pub current_stage: Option<i64>,
    pub current_stage_label: Option<String>,
    pub paused: bool,
    pub finalized: bool,
    /// Tokens swept back to the owner on finalization.
    pub swept: Option<String>,
}

/// Fold stored events, oldest first, into a [`SaleSummary`].
///
/// Amounts that fail to parse are skipped.
pub fn summarize(events: &[EventRecord]) -> SaleSummary {
    let mut total_raised: i128 = 0;
    let mut tokens_sold: i128 = 0;
    let mut buyers: HashSet<&str> = HashSet::new();
    let mut summary = SaleSummary::default();

    for ev in events {
        match EventKind::from_str_name(&ev.event_type) {
            EventKind::TokensPurchased => {
                summary.purchase_count += 1;
                total_raised = total_raised.saturating_add(parse_amount(ev.amount.as_deref()));
                tokens_sold =
                    tokens_sold.saturating_add(parse_amount(ev.token_amount.as_deref()));
                if let Some(buyer) = ev.actor.as_deref() {
                    buyers.insert(buyer);
                }
            }
            EventKind::StageChanged => summary.current_stage = ev.stage,
            EventKind::SalePaused => summary.paused = true,
            EventKind::SaleResumed => summary.paused = false,
            EventKind::SaleFinalized => {
                summary.finalized = true;
                summary.paused = false;
                summary.swept = ev.amount.clone();
            }
            _ => {}
        }
    }

    summary.buyer_count = buyers.len();
    summary.total_raised = total_raised.to_string();
    summary.tokens_sold = tokens_sold.to_string();
    summary.current_stage_label = summary
        .current_stage
        .and_then(stage_label)
        .map(String::from);
    summary
}

fn parse_amount(raw: Option<&str>) -> i128 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}
