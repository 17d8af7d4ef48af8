extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::test_setup::{setup, UNIT};
use crate::{Error, Stage};

#[test]
fn test_non_owner_cannot_run_privileged_operations() {
    let sale = setup();
    let intruder = Address::generate(&sale.env);
    let target = Address::generate(&sale.env);
    let unauthorized = Err(Ok(Error::Unauthorized));

    let state_before = sale.client.get_sale_state();
    let ledger_before = sale.client.get_accounting();
    let pool_before = sale.pool_balance();

    assert_eq!(
        sale.client
            .try_authorize(&intruder, &vec![&sale.env, target.clone()]),
        unauthorized
    );
    assert_eq!(sale.client.try_start_private_sale(&intruder), unauthorized);
    assert_eq!(sale.client.try_end_private_sale(&intruder), unauthorized);
    assert_eq!(sale.client.try_start_pre_sale(&intruder), unauthorized);
    assert_eq!(sale.client.try_end_pre_sale(&intruder), unauthorized);
    assert_eq!(sale.client.try_start_round_one(&intruder), unauthorized);
    assert_eq!(sale.client.try_end_round_one(&intruder), unauthorized);
    assert_eq!(sale.client.try_start_round_two(&intruder), unauthorized);
    assert_eq!(sale.client.try_end_round_two(&intruder), unauthorized);
    assert_eq!(sale.client.try_start_round_three(&intruder), unauthorized);
    assert_eq!(sale.client.try_end_round_three(&intruder), unauthorized);
    assert_eq!(sale.client.try_start_round_four(&intruder), unauthorized);
    assert_eq!(sale.client.try_end_round_four(&intruder), unauthorized);
    assert_eq!(sale.client.try_pause(&intruder), unauthorized);
    assert_eq!(sale.client.try_resume(&intruder), unauthorized);
    assert_eq!(
        sale.client.try_set_reference_price(&intruder, &1),
        unauthorized
    );
    assert_eq!(
        sale.client.try_transfer_ownership(&intruder, &intruder),
        unauthorized
    );

    assert_eq!(sale.client.get_sale_state(), state_before);
    assert_eq!(sale.client.get_accounting(), ledger_before);
    assert_eq!(sale.pool_balance(), pool_before);
    assert!(!sale.client.is_allowlisted(&target));
    assert_eq!(sale.client.get_owner(), sale.owner);
}

#[test]
fn test_non_owner_cannot_finalize() {
    let sale = setup();
    let intruder = Address::generate(&sale.env);
    let pool_before = sale.pool_balance();

    assert_eq!(
        sale.client.try_finalize_sale(&intruder),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(sale.pool_balance(), pool_before);
    assert_eq!(sale.token.balance(&intruder), 0);
    assert!(!sale.client.is_finalized());
}

#[test]
fn test_owner_check_precedes_finalized_check() {
    let sale = setup();
    let intruder = Address::generate(&sale.env);
    sale.client.finalize_sale(&sale.owner);

    assert_eq!(
        sale.client.try_pause(&intruder),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        sale.client.try_finalize_sale(&intruder),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_authorize_sets_every_listed_address() {
    let sale = setup();
    let a = Address::generate(&sale.env);
    let b = Address::generate(&sale.env);
    let c = Address::generate(&sale.env);
    let untouched = Address::generate(&sale.env);

    assert!(!sale.client.is_allowlisted(&a));
    sale.client
        .authorize(&sale.owner, &vec![&sale.env, a.clone(), b.clone(), a.clone()]);

    assert!(sale.client.is_allowlisted(&a));
    assert!(sale.client.is_allowlisted(&b));
    assert!(!sale.client.is_allowlisted(&c));
    assert!(!sale.client.is_allowlisted(&untouched));

    // Re-authorizing is idempotent and never clears existing entries.
    sale.client
        .authorize(&sale.owner, &vec![&sale.env, c.clone(), a.clone()]);
    assert!(sale.client.is_allowlisted(&a));
    assert!(sale.client.is_allowlisted(&b));
    assert!(sale.client.is_allowlisted(&c));

    sale.client.authorize(&sale.owner, &vec![&sale.env]);
    assert!(sale.client.is_allowlisted(&b));
}

#[test]
fn test_authorize_allowed_while_paused() {
    let sale = setup();
    let a = Address::generate(&sale.env);
    sale.client.pause(&sale.owner);
    sale.client.authorize(&sale.owner, &vec![&sale.env, a.clone()]);
    assert!(sale.client.is_allowlisted(&a));
}

#[test]
fn test_transfer_ownership_moves_every_privilege() {
    let sale = setup();
    let new_owner = Address::generate(&sale.env);

    sale.client.transfer_ownership(&sale.owner, &new_owner);
    assert_eq!(sale.client.get_owner(), new_owner);

    assert_eq!(
        sale.client.try_start_private_sale(&sale.owner),
        Err(Ok(Error::Unauthorized))
    );
    sale.client.start_private_sale(&new_owner);
    assert_eq!(sale.client.get_stage(), Stage::PrivateSaleOpen);

    // The sweep goes to the current owner.
    let pool = sale.pool_balance();
    assert_eq!(sale.client.finalize_sale(&new_owner), pool);
    assert_eq!(sale.token.balance(&new_owner), pool);
}

#[test]
fn test_buyer_must_be_allowlisted_in_every_open_stage() {
    let sale = setup();
    let stranger = sale.funded_buyer(6);
    let owner = &sale.owner;

    sale.client.start_private_sale(owner);
    assert_eq!(
        sale.client.try_buy(&stranger, &(6 * UNIT)),
        Err(Ok(Error::NotAllowlisted))
    );
    sale.client.end_private_sale(owner);
    sale.client.start_pre_sale(owner);
    assert_eq!(
        sale.client.try_buy(&stranger, &(6 * UNIT)),
        Err(Ok(Error::NotAllowlisted))
    );

    sale.client.authorize(owner, &vec![&sale.env, stranger.clone()]);
    assert_eq!(sale.client.buy(&stranger, &(6 * UNIT)), 720_000);
}
