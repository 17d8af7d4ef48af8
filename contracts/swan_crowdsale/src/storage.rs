//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the crowdsale.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key      | Type          | Description                              |
//! |----------|---------------|------------------------------------------|
//! | `Config` | `SaleConfig`  | Owner, wallet, tokens, rates, unit       |
//! | `State`  | `SaleState`   | Stage pointer and pause overlay          |
//! | `Ledger` | `Accounting`  | Raised funds, sold counters, ref. price  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                | Type   | Description                        |
//! |--------------------|--------|------------------------------------|
//! | `Allowed(addr)`    | `bool` | Allow-list entry; absent == false  |
//! | `StageSold(stage)` | `i128` | Tokens issued during `stage`       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Accounting, SaleConfig, SaleState, Stage};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Deployment configuration (Instance).
    Config,
    /// Stage pointer and pause overlay (Instance).
    State,
    /// Running totals (Instance).
    Ledger,
    /// Allow-list entry for an address (Persistent).
    Allowed(Address),
    /// Tokens issued during a stage (Persistent).
    StageSold(Stage),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Load the configuration, failing with `NotInitialized` before `init`.
pub fn load_config(env: &Env) -> Result<SaleConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn save_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_state(env: &Env) -> Result<SaleState, Error> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

pub fn save_state(env: &Env, state: &SaleState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

pub fn load_ledger(env: &Env) -> Result<Accounting, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Ledger)
        .ok_or(Error::NotInitialized)
}

pub fn save_ledger(env: &Env, ledger: &Accounting) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn is_allowed(env: &Env, address: &Address) -> bool {
    let key = DataKey::Allowed(address.clone());
    match env.storage().persistent().get::<_, bool>(&key) {
        Some(allowed) => {
            bump_persistent(env, &key);
            allowed
        }
        None => false,
    }
}

pub fn set_allowed(env: &Env, address: &Address) {
    let key = DataKey::Allowed(address.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

/// Tokens issued during `stage`; zero when nothing was sold.
pub fn stage_tokens_sold(env: &Env, stage: Stage) -> i128 {
    let key = DataKey::StageSold(stage);
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(sold) => {
            bump_persistent(env, &key);
            sold
        }
        None => 0,
    }
}

pub fn set_stage_tokens_sold(env: &Env, stage: Stage, sold: i128) {
    let key = DataKey::StageSold(stage);
    env.storage().persistent().set(&key, &sold);
    bump_persistent(env, &key);
}
