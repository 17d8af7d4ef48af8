//! # SWAN Crowdsale Contract
//!
//! A staged token sale. The owner funds the contract with sale tokens, opens
//! and closes a fixed chain of stages, and allow-lists buyers; buyers pay in
//! the payment token and receive sale tokens at the rate of the open stage.
//!
//! | Phase        | Entry Point(s)                                              |
//! |--------------|-------------------------------------------------------------|
//! | Bootstrap    | [`SwanCrowdsale::init`]                                     |
//! | Allow-list   | `authorize`                                                 |
//! | Stages       | `start_*` / `end_*`, `pause`, `resume`                      |
//! | Admin        | `set_reference_price`, `transfer_ownership`                 |
//! | Purchase     | [`SwanCrowdsale::buy`]                                      |
//! | Finalization | [`SwanCrowdsale::finalize_sale`]                            |
//! | Queries      | `get_stage_label`, `get_total_raised`, `is_allowlisted`, …  |
//!
//! ## Architecture
//!
//! Authorization lives in [`access`], stage transitions in [`stage`] (pure
//! functions over [`SaleState`]), purchase arithmetic in [`pricing`] and
//! storage access in `storage`. Every entry point loads the state, runs all
//! checks, and only then writes storage, moves tokens and emits its event.
//! A failed call therefore leaves no trace; the host additionally rolls back
//! the whole invocation on any `Err`.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String, Vec};

pub mod access;
pub mod events;
pub mod pricing;
pub mod stage;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_access;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_setup;

pub use types::{Accounting, PriceSchedule, SaleConfig, SaleState, Stage};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    NotAllowlisted = 2,
    SaleNotActive = 3,
    InvalidTransition = 4,
    AlreadyPaused = 5,
    NotPaused = 6,
    ZeroPurchase = 7,
    InsufficientPool = 8,
    AlreadyFinalized = 9,
    SaleFinalized = 10,
    AlreadyInitialized = 11,
    NotInitialized = 12,
    InvalidConfig = 13,
    ArithmeticOverflow = 14,
}

#[contract]
pub struct SwanCrowdsale;

#[contractimpl]
impl SwanCrowdsale {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the sale. Must be called exactly once after deployment.
    ///
    /// - `owner` must sign and becomes the only administrator.
    /// - `wallet` receives every purchase payment.
    /// - `token` is the token being sold; fund the pool by transferring it to
    ///   this contract's address.
    /// - `payment_token` is what buyers pay with.
    /// - `currency_unit` is the smallest-unit count of one whole payment unit.
    pub fn init(
        env: Env,
        owner: Address,
        wallet: Address,
        token: Address,
        payment_token: Address,
        rates: PriceSchedule,
        currency_unit: i128,
        reference_price_cents: u64,
    ) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if !rates.is_valid() || currency_unit <= 0 {
            return Err(Error::InvalidConfig);
        }

        let config = SaleConfig {
            owner: owner.clone(),
            wallet: wallet.clone(),
            token: token.clone(),
            payment_token,
            rates,
            currency_unit,
        };
        storage::save_config(&env, &config);
        storage::save_state(&env, &SaleState::new());
        storage::save_ledger(
            &env,
            &Accounting {
                reference_price_cents,
                ..Accounting::default()
            },
        );

        events::emit_sale_initialized(&env, owner, wallet, token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Allow-list
    // ─────────────────────────────────────────────────────────

    /// Allow every address in `addresses` to buy. Owner only.
    pub fn authorize(env: Env, caller: Address, addresses: Vec<Address>) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        access::authorize(&env, &addresses);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Stage transitions
    // ─────────────────────────────────────────────────────────

    pub fn start_private_sale(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::NotStarted, Stage::PrivateSaleOpen)
    }

    pub fn end_private_sale(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::PrivateSaleOpen, Stage::PrivateSaleClosed)
    }

    pub fn start_pre_sale(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::PrivateSaleClosed, Stage::PreSaleOpen)
    }

    pub fn end_pre_sale(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::PreSaleOpen, Stage::PreSaleClosed)
    }

    pub fn start_round_one(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::PreSaleClosed, Stage::RoundOneOpen)
    }

    pub fn end_round_one(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::RoundOneOpen, Stage::RoundOneClosed)
    }

    pub fn start_round_two(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::RoundOneClosed, Stage::RoundTwoOpen)
    }

    pub fn end_round_two(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::RoundTwoOpen, Stage::RoundTwoClosed)
    }

    pub fn start_round_three(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::RoundTwoClosed, Stage::RoundThreeOpen)
    }

    pub fn end_round_three(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::RoundThreeOpen, Stage::RoundThreeClosed)
    }

    pub fn start_round_four(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::RoundThreeClosed, Stage::RoundFourOpen)
    }

    pub fn end_round_four(env: Env, caller: Address) -> Result<(), Error> {
        Self::advance(&env, &caller, Stage::RoundFourOpen, Stage::RoundFourClosed)
    }

    /// Suspend purchases and stage transitions without leaving the current stage.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        let mut state = Self::require_admin(&env, &caller)?;
        state.pause()?;
        storage::save_state(&env, &state);
        events::emit_sale_paused(&env, caller, state.stage);
        Ok(())
    }

    /// Lift the pause and restore the stage that was active when it began.
    pub fn resume(env: Env, caller: Address) -> Result<(), Error> {
        let mut state = Self::require_admin(&env, &caller)?;
        let restored = state.resume()?;
        storage::save_state(&env, &state);
        events::emit_sale_resumed(&env, caller, restored);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    /// Update the informational reference price (currency value in cents).
    ///
    /// Owner only. Stays available after finalization.
    pub fn set_reference_price(env: Env, caller: Address, cents: u64) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::load_config(&env)?;
        access::require_owner(&config, &caller)?;
        let mut ledger = storage::load_ledger(&env)?;
        let old_cents = ledger.reference_price_cents;
        ledger.reference_price_cents = cents;
        storage::save_ledger(&env, &ledger);
        events::emit_reference_price_set(&env, caller, old_cents, cents);
        Ok(())
    }

    /// Hand every owner privilege to `new_owner` in a single step.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        let mut config = storage::load_config(&env)?;
        config.owner = new_owner.clone();
        storage::save_config(&env, &config);
        events::emit_ownership_transferred(&env, caller, new_owner);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Purchase
    // ─────────────────────────────────────────────────────────

    /// Buy sale tokens with `amount_sent` payment-token units.
    ///
    /// Checks, in order: the sale is started, unpaused and in an open stage
    /// (`SaleNotActive`); `buyer` is allow-listed (`NotAllowlisted`);
    /// `amount_sent` buys at least one token unit (`ZeroPurchase`); the pool
    /// covers the purchase (`InsufficientPool`). On success the payment goes
    /// straight to the treasury wallet and the tokens go to `buyer`.
    ///
    /// Returns the number of tokens issued.
    pub fn buy(env: Env, buyer: Address, amount_sent: i128) -> Result<i128, Error> {
        buyer.require_auth();
        let config = storage::load_config(&env)?;
        let state = storage::load_state(&env)?;

        let stage = state.ensure_purchasable()?;
        access::require_allowed(&env, &buyer)?;
        if amount_sent <= 0 {
            return Err(Error::ZeroPurchase);
        }

        let rate = config.rates.rate_for(stage).ok_or(Error::SaleNotActive)?;
        let token_amount = pricing::token_amount(amount_sent, rate, config.currency_unit)?;
        if token_amount == 0 {
            return Err(Error::ZeroPurchase);
        }

        let pool = env.current_contract_address();
        let sale_token = token::Client::new(&env, &config.token);
        if sale_token.balance(&pool) < token_amount {
            return Err(Error::InsufficientPool);
        }

        // Nothing below the transfers may fail.
        let mut ledger = storage::load_ledger(&env)?;
        ledger.total_raised = ledger
            .total_raised
            .checked_add(amount_sent)
            .ok_or(Error::ArithmeticOverflow)?;
        ledger.tokens_sold = ledger
            .tokens_sold
            .checked_add(token_amount)
            .ok_or(Error::ArithmeticOverflow)?;
        if stage == Stage::PrivateSaleOpen {
            let value = pricing::reference_value(
                amount_sent,
                ledger.reference_price_cents,
                config.currency_unit,
            )?;
            ledger.private_stage_sold = ledger
                .private_stage_sold
                .checked_add(value)
                .ok_or(Error::ArithmeticOverflow)?;
        }
        let stage_sold = storage::stage_tokens_sold(&env, stage)
            .checked_add(token_amount)
            .ok_or(Error::ArithmeticOverflow)?;

        token::Client::new(&env, &config.payment_token).transfer(
            &buyer,
            &config.wallet,
            &amount_sent,
        );
        sale_token.transfer(&pool, &buyer, &token_amount);

        storage::save_ledger(&env, &ledger);
        storage::set_stage_tokens_sold(&env, stage, stage_sold);
        events::emit_tokens_purchased(&env, buyer, stage, amount_sent, token_amount);

        Ok(token_amount)
    }

    // ─────────────────────────────────────────────────────────
    // Finalization
    // ─────────────────────────────────────────────────────────

    /// Return every unsold token to the owner and freeze the sale.
    ///
    /// Allowed from any stage. After this call every administrative and
    /// purchase entry point fails with `SaleFinalized`; queries keep working.
    /// Returns the amount swept, which may be zero.
    pub fn finalize_sale(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let config = storage::load_config(&env)?;
        access::require_owner(&config, &caller)?;
        let mut state = storage::load_state(&env)?;
        let previous = state.finalize()?;

        let pool = env.current_contract_address();
        let sale_token = token::Client::new(&env, &config.token);
        let remainder = sale_token.balance(&pool);
        if remainder > 0 {
            sale_token.transfer(&pool, &config.owner, &remainder);
        }

        storage::save_state(&env, &state);
        events::emit_stage_changed(&env, previous, Stage::Finalized);
        events::emit_sale_finalized(&env, caller, remainder);
        Ok(remainder)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// `"paused"` while paused, otherwise the current stage's label.
    pub fn get_stage_label(env: Env) -> Result<String, Error> {
        let state = storage::load_state(&env)?;
        Ok(String::from_str(&env, state.label()))
    }

    /// Current stage pointer. Unaffected by the pause overlay.
    pub fn get_stage(env: Env) -> Result<Stage, Error> {
        Ok(storage::load_state(&env)?.stage)
    }

    pub fn get_sale_state(env: Env) -> Result<SaleState, Error> {
        storage::load_state(&env)
    }

    pub fn is_sale_started(env: Env) -> Result<bool, Error> {
        Ok(storage::load_state(&env)?.started)
    }

    pub fn is_paused(env: Env) -> Result<bool, Error> {
        Ok(storage::load_state(&env)?.paused)
    }

    pub fn is_finalized(env: Env) -> Result<bool, Error> {
        Ok(storage::load_state(&env)?.is_finalized())
    }

    pub fn get_total_raised(env: Env) -> Result<i128, Error> {
        Ok(storage::load_ledger(&env)?.total_raised)
    }

    /// Private-stage purchases valued in reference-price cents at the time of
    /// each purchase. See `get_stage_tokens_sold` for issued tokens.
    pub fn get_private_stage_sold(env: Env) -> Result<i128, Error> {
        Ok(storage::load_ledger(&env)?.private_stage_sold)
    }

    /// Tokens issued while `stage` was open.
    pub fn get_stage_tokens_sold(env: Env, stage: Stage) -> i128 {
        storage::stage_tokens_sold(&env, stage)
    }

    pub fn get_tokens_sold(env: Env) -> Result<i128, Error> {
        Ok(storage::load_ledger(&env)?.tokens_sold)
    }

    /// Current sale-pool balance.
    pub fn get_tokens_remaining(env: Env) -> Result<i128, Error> {
        let config = storage::load_config(&env)?;
        Ok(token::Client::new(&env, &config.token).balance(&env.current_contract_address()))
    }

    pub fn is_allowlisted(env: Env, address: Address) -> bool {
        access::is_allowed(&env, &address)
    }

    pub fn get_reference_price(env: Env) -> Result<u64, Error> {
        Ok(storage::load_ledger(&env)?.reference_price_cents)
    }

    pub fn get_rate(env: Env, stage: Stage) -> Result<Option<i128>, Error> {
        Ok(storage::load_config(&env)?.rates.rate_for(stage))
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        storage::load_config(&env)
    }

    pub fn get_accounting(env: Env) -> Result<Accounting, Error> {
        storage::load_ledger(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, Error> {
        Ok(storage::load_config(&env)?.owner)
    }

    pub fn get_wallet(env: Env) -> Result<Address, Error> {
        Ok(storage::load_config(&env)?.wallet)
    }

    pub fn get_token(env: Env) -> Result<Address, Error> {
        Ok(storage::load_config(&env)?.token)
    }
}

impl SwanCrowdsale {
    /// Authenticate `caller`, require ownership and refuse once finalized.
    ///
    /// Returns the current state for the caller to transition.
    fn require_admin(env: &Env, caller: &Address) -> Result<SaleState, Error> {
        caller.require_auth();
        let config = storage::load_config(env)?;
        access::require_owner(&config, caller)?;
        let state = storage::load_state(env)?;
        state.ensure_not_finalized()?;
        Ok(state)
    }

    fn advance(env: &Env, caller: &Address, expected_from: Stage, to: Stage) -> Result<(), Error> {
        let mut state = Self::require_admin(env, caller)?;
        state.advance(expected_from, to)?;
        storage::save_state(env, &state);
        events::emit_stage_changed(env, expected_from, to);
        Ok(())
    }
}
