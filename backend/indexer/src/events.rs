//! Canonical event types emitted by the SWAN crowdsale contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/swan_crowdsale/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the crowdsale contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The sale was configured (`init` topic).
    SaleInitialized,
    /// An address joined the allow-list (`allowed` topic).
    AddressAllowed,
    /// The stage pointer moved (`stage` topic).
    StageChanged,
    /// The pause overlay was applied (`paused` topic).
    SalePaused,
    /// The pause overlay was lifted (`resumed` topic).
    SaleResumed,
    /// A buyer purchased tokens (`purchase` topic).
    TokensPurchased,
    /// The reference price changed (`price` topic).
    ReferencePriceSet,
    /// Ownership moved to a new address (`owner` topic).
    OwnershipTransferred,
    /// Unsold tokens were swept and the sale frozen (`finalized` topic).
    SaleFinalized,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::SaleInitialized,
            "allowed" => Self::AddressAllowed,
            "stage" => Self::StageChanged,
            "paused" => Self::SalePaused,
            "resumed" => Self::SaleResumed,
            "purchase" => Self::TokensPurchased,
            "price" => Self::ReferencePriceSet,
            "owner" => Self::OwnershipTransferred,
            "finalized" => Self::SaleFinalized,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SaleInitialized => "sale_initialized",
            Self::AddressAllowed => "address_allowed",
            Self::StageChanged => "stage_changed",
            Self::SalePaused => "sale_paused",
            Self::SaleResumed => "sale_resumed",
            Self::TokensPurchased => "tokens_purchased",
            Self::ReferencePriceSet => "reference_price_set",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::SaleFinalized => "sale_finalized",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`], for rows read back from the database.
    pub fn from_str_name(name: &str) -> Self {
        match name {
            "sale_initialized" => Self::SaleInitialized,
            "address_allowed" => Self::AddressAllowed,
            "stage_changed" => Self::StageChanged,
            "sale_paused" => Self::SalePaused,
            "sale_resumed" => Self::SaleResumed,
            "tokens_purchased" => Self::TokensPurchased,
            "reference_price_set" => Self::ReferencePriceSet,
            "ownership_transferred" => Self::OwnershipTransferred,
            "sale_finalized" => Self::SaleFinalized,
            _ => Self::Unknown,
        }
    }
}

/// Label of a contract stage discriminant, matching `Stage::label` on-chain.
pub fn stage_label(stage: i64) -> Option<&'static str> {
    let label = match stage {
        0 => "CrowdSale Not Started",
        1 => "Private Sale Start",
        2 => "Private Sale End",
        3 => "Presale Started",
        4 => "Presale Ended",
        5 => "CrowdSale Round One Started",
        6 => "CrowdSale Round One End",
        7 => "CrowdSale Round Two Started",
        8 => "CrowdSale Round Two End",
        9 => "CrowdSale Round Three Started",
        10 => "CrowdSale Round Three End",
        11 => "CrowdSale Round Four Started",
        12 => "CrowdSale Round Four End",
        13 => "CrowdSale Finalized",
        _ => return None,
    };
    Some(label)
}

/// A fully decoded sale event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleEvent {
    /// RPC event id; unique per event and used for idempotent inserts.
    pub event_id: Option<String>,
    pub event_type: String,
    /// Second topic: the buyer, owner, allowed address or new stage.
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub stage: Option<i64>,
    /// Payment amount for purchases, new price for price events, sweep for finalization.
    pub amount: Option<String>,
    /// Tokens issued, purchases only.
    pub token_amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: Option<String>,
    pub event_type: String,
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub stage: Option<i64>,
    pub amount: Option<String>,
    pub token_amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
