extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal,
};

use crate::events::{
    AddressAllowed, OwnershipTransferred, ReferencePriceSet, SaleFinalized, SalePaused,
    SaleResumed, StageChanged, TokensPurchased,
};
use crate::test_setup::{setup, UNIT};
use crate::Stage;

#[test]
fn test_stage_changed_event() {
    let sale = setup();
    sale.client.start_private_sale(&sale.owner);

    let all_events = sale.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("stage"), new stage)
    assert_eq!(last_event.0, sale.client.address);
    let expected_topics = vec![
        &sale.env,
        symbol_short!("stage").into_val(&sale.env),
        Stage::PrivateSaleOpen.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: StageChanged = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        event_data,
        StageChanged {
            from: Stage::NotStarted,
            to: Stage::PrivateSaleOpen,
        }
    );
}

#[test]
fn test_address_allowed_event() {
    let sale = setup();
    let buyer = Address::generate(&sale.env);
    sale.client
        .authorize(&sale.owner, &vec![&sale.env, buyer.clone()]);

    let all_events = sale.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &sale.env,
        symbol_short!("allowed").into_val(&sale.env),
        buyer.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: AddressAllowed = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(event_data, AddressAllowed { address: buyer });
}

#[test]
fn test_tokens_purchased_event() {
    let sale = setup();
    let buyer = sale.allowed_buyer(6);
    sale.client.start_private_sale(&sale.owner);
    sale.client.buy(&buyer, &(6 * UNIT));

    let all_events = sale.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, sale.client.address);
    let expected_topics = vec![
        &sale.env,
        symbol_short!("purchase").into_val(&sale.env),
        buyer.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensPurchased = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        event_data,
        TokensPurchased {
            buyer: buyer.clone(),
            stage: Stage::PrivateSaleOpen,
            amount_sent: 6 * UNIT,
            token_amount: 750_000,
        }
    );
}

#[test]
fn test_pause_and_resume_events() {
    let sale = setup();
    sale.client.start_private_sale(&sale.owner);

    sale.client.pause(&sale.owner);
    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("paused").into_val(&sale.env),
        sale.owner.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let paused: SalePaused = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        paused,
        SalePaused {
            stage: Stage::PrivateSaleOpen
        }
    );

    sale.client.resume(&sale.owner);
    let last_event = sale.env.events().all().last().expect("No events found");
    let resumed: SaleResumed = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        resumed,
        SaleResumed {
            stage: Stage::PrivateSaleOpen
        }
    );
}

#[test]
fn test_reference_price_and_ownership_events() {
    let sale = setup();
    sale.client.set_reference_price(&sale.owner, &15_000);

    let last_event = sale.env.events().all().last().expect("No events found");
    let price: ReferencePriceSet = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        price,
        ReferencePriceSet {
            old_cents: 10_000,
            new_cents: 15_000,
        }
    );

    let new_owner = Address::generate(&sale.env);
    sale.client.transfer_ownership(&sale.owner, &new_owner);
    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("owner").into_val(&sale.env),
        new_owner.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let transferred: OwnershipTransferred = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        transferred,
        OwnershipTransferred {
            previous: sale.owner.clone(),
            current: new_owner,
        }
    );
}

#[test]
fn test_sale_finalized_event() {
    let sale = setup();
    let pool = sale.pool_balance();
    sale.client.finalize_sale(&sale.owner);

    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("finalized").into_val(&sale.env),
        sale.owner.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let finalized: SaleFinalized = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(finalized, SaleFinalized { swept: pool });
}
