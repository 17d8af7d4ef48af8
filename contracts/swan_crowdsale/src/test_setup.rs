extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env};

use crate::{PriceSchedule, SwanCrowdsale, SwanCrowdsaleClient};

/// One whole payment-currency unit at 18 decimals.
pub const UNIT: i128 = 1_000_000_000_000_000_000;
/// Sale tokens the owner moves into the pool.
pub const POOL_FUNDING: i128 = 30_000 * UNIT;
/// Sale tokens minted to the owner before funding the pool.
pub const OWNER_SUPPLY: i128 = 50_000 * UNIT;
pub const REFERENCE_PRICE_CENTS: u64 = 10_000;

pub fn reference_rates() -> PriceSchedule {
    PriceSchedule {
        private_sale: 125_000,
        pre_sale: 120_000,
        round_one: 115_000,
        round_two: 110_000,
        round_three: 105_000,
        round_four: 10_000,
    }
}

pub struct Sale {
    pub env: Env,
    pub client: SwanCrowdsaleClient<'static>,
    pub owner: Address,
    pub wallet: Address,
    pub token: token::Client<'static>,
    pub payment: token::Client<'static>,
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

/// Registered but not yet initialised contract.
pub fn setup_uninitialized() -> (Env, SwanCrowdsaleClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SwanCrowdsale, ());
    let client = SwanCrowdsaleClient::new(&env, &contract_id);
    (env, client)
}

/// Initialised sale whose pool holds [`POOL_FUNDING`] tokens, funded by the
/// owner with a plain transfer. The owner is also the treasury wallet.
pub fn setup() -> Sale {
    setup_with_pool(POOL_FUNDING)
}

pub fn setup_with_pool(pool_funding: i128) -> Sale {
    let (env, client) = setup_uninitialized();
    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let payment = create_token(&env, &token_admin);

    client.init(
        &owner,
        &owner,
        &token.address,
        &payment.address,
        &reference_rates(),
        &UNIT,
        &REFERENCE_PRICE_CENTS,
    );

    token::StellarAssetClient::new(&env, &token.address).mint(&owner, &OWNER_SUPPLY);
    if pool_funding > 0 {
        token.transfer(&owner, &client.address, &pool_funding);
    }

    Sale {
        wallet: owner.clone(),
        env,
        client,
        owner,
        token,
        payment,
    }
}

impl Sale {
    /// New address holding `units` whole payment units.
    pub fn funded_buyer(&self, units: i128) -> Address {
        let buyer = Address::generate(&self.env);
        token::StellarAssetClient::new(&self.env, &self.payment.address)
            .mint(&buyer, &(units * UNIT));
        buyer
    }

    /// New allow-listed address holding `units` whole payment units.
    pub fn allowed_buyer(&self, units: i128) -> Address {
        let buyer = self.funded_buyer(units);
        self.client
            .authorize(&self.owner, &soroban_sdk::vec![&self.env, buyer.clone()]);
        buyer
    }

    pub fn pool_balance(&self) -> i128 {
        self.token.balance(&self.client.address)
    }
}
