//! # Types
//!
//! Shared data structures used across all modules of the crowdsale.
//!
//! ## Stage chain
//!
//! [`Stage`] is a closed, ordered enumeration. Forward transitions follow a
//! fixed linear chain; every `Open` stage is followed by its `Closed`
//! counterpart, which is in turn followed by the next round's `Open` stage:
//!
//! ```text
//! NotStarted ──► PrivateSaleOpen ──► PrivateSaleClosed ──► PreSaleOpen ──► …
//!     … ──► RoundFourOpen ──► RoundFourClosed
//! (any stage) ──► Finalized
//! ```
//!
//! Pausing is **not** a stage. It is an overlay kept in [`SaleState`] next to
//! the stage pointer, so that resuming returns to the exact stage that was
//! active when the pause began.

use soroban_sdk::{contracttype, Address};

/// Phase of the sale. Discriminants give the chain order.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Stage {
    NotStarted = 0,
    PrivateSaleOpen = 1,
    PrivateSaleClosed = 2,
    PreSaleOpen = 3,
    PreSaleClosed = 4,
    RoundOneOpen = 5,
    RoundOneClosed = 6,
    RoundTwoOpen = 7,
    RoundTwoClosed = 8,
    RoundThreeOpen = 9,
    RoundThreeClosed = 10,
    RoundFourOpen = 11,
    RoundFourClosed = 12,
    Finalized = 13,
}

/// Stage pointer plus the pause overlay.
///
/// `paused == true` implies `pre_pause_stage` holds the stage that was active
/// when the pause began. `started` flips to `true` once, on entering the first
/// open stage, and is left untouched by pausing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleState {
    pub stage: Stage,
    pub started: bool,
    pub paused: bool,
    pub pre_pause_stage: Option<Stage>,
}

/// Tokens issued per whole unit of the payment currency, one rate per open
/// stage. Each rate is an independent constant; no progression is assumed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceSchedule {
    pub private_sale: i128,
    pub pre_sale: i128,
    pub round_one: i128,
    pub round_two: i128,
    pub round_three: i128,
    pub round_four: i128,
}

/// Deployment configuration, written by `init`.
///
/// Only `owner` may change afterwards (`transfer_ownership`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Holder of every administrative privilege; receives the sweep on finalization.
    pub owner: Address,
    /// Treasury wallet that receives every purchase payment.
    pub wallet: Address,
    /// Token being sold. The contract's own balance of it is the sale pool.
    pub token: Address,
    /// Token buyers pay with (the native-asset contract in production).
    pub payment_token: Address,
    /// Per-stage exchange rates.
    pub rates: PriceSchedule,
    /// Smallest-unit count of one whole payment-currency unit (e.g. `10^18`).
    pub currency_unit: i128,
}

/// Running totals of the sale.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Accounting {
    /// Sum of every accepted `amount_sent`, in payment-token smallest units.
    pub total_raised: i128,
    /// Sum of every issued token amount, in sale-token smallest units.
    pub tokens_sold: i128,
    /// Value of private-stage purchases in reference-price cents.
    pub private_stage_sold: i128,
    /// Informational currency valuation in hundredths. Not used for pricing.
    pub reference_price_cents: u64,
}
