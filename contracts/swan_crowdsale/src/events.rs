//! # Events
//!
//! Every successful state change publishes exactly one event. Topics are
//! `(symbol, subject)`; the payload is one of the `#[contracttype]` structs
//! below so that off-chain consumers can decode it by field name.
//!
//! | Topic       | Subject   | Payload                  |
//! |-------------|-----------|--------------------------|
//! | `init`      | owner     | [`SaleInitialized`]      |
//! | `allowed`   | address   | [`AddressAllowed`]       |
//! | `stage`     | new stage | [`StageChanged`]         |
//! | `paused`    | owner     | [`SalePaused`]           |
//! | `resumed`   | owner     | [`SaleResumed`]          |
//! | `purchase`  | buyer     | [`TokensPurchased`]      |
//! | `price`     | owner     | [`ReferencePriceSet`]    |
//! | `owner`     | new owner | [`OwnershipTransferred`] |
//! | `finalized` | owner     | [`SaleFinalized`]        |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::Stage;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleInitialized {
    pub owner: Address,
    pub wallet: Address,
    pub token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressAllowed {
    pub address: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StageChanged {
    pub from: Stage,
    pub to: Stage,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SalePaused {
    pub stage: Stage,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleResumed {
    pub stage: Stage,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensPurchased {
    pub buyer: Address,
    pub stage: Stage,
    pub amount_sent: i128,
    pub token_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferencePriceSet {
    pub old_cents: u64,
    pub new_cents: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous: Address,
    pub current: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleFinalized {
    /// Unsold tokens returned to the owner.
    pub swept: i128,
}

pub fn emit_sale_initialized(env: &Env, owner: Address, wallet: Address, token: Address) {
    env.events().publish(
        (symbol_short!("init"), owner.clone()),
        SaleInitialized {
            owner,
            wallet,
            token,
        },
    );
}

pub fn emit_address_allowed(env: &Env, address: Address) {
    env.events().publish(
        (symbol_short!("allowed"), address.clone()),
        AddressAllowed { address },
    );
}

pub fn emit_stage_changed(env: &Env, from: Stage, to: Stage) {
    env.events()
        .publish((symbol_short!("stage"), to), StageChanged { from, to });
}

pub fn emit_sale_paused(env: &Env, owner: Address, stage: Stage) {
    env.events()
        .publish((symbol_short!("paused"), owner), SalePaused { stage });
}

pub fn emit_sale_resumed(env: &Env, owner: Address, stage: Stage) {
    env.events()
        .publish((symbol_short!("resumed"), owner), SaleResumed { stage });
}

pub fn emit_tokens_purchased(
    env: &Env,
    buyer: Address,
    stage: Stage,
    amount_sent: i128,
    token_amount: i128,
) {
    env.events().publish(
        (symbol_short!("purchase"), buyer.clone()),
        TokensPurchased {
            buyer,
            stage,
            amount_sent,
            token_amount,
        },
    );
}

pub fn emit_reference_price_set(env: &Env, owner: Address, old_cents: u64, new_cents: u64) {
    env.events().publish(
        (symbol_short!("price"), owner),
        ReferencePriceSet {
            old_cents,
            new_cents,
        },
    );
}

pub fn emit_ownership_transferred(env: &Env, previous: Address, current: Address) {
    env.events().publish(
        (symbol_short!("owner"), current.clone()),
        OwnershipTransferred { previous, current },
    );
}

pub fn emit_sale_finalized(env: &Env, owner: Address, swept: i128) {
    env.events()
        .publish((symbol_short!("finalized"), owner), SaleFinalized { swept });
}
