//! # Access control
//!
//! Two guards, both evaluated before any state is touched:
//!
//! - [`require_owner`] gates every administrative entry point.
//! - [`require_allowed`] gates purchases on the allow-list.
//!
//! The allow-list only grows: [`authorize`] sets entries to `true` and no
//! entry point ever clears one.

use soroban_sdk::{Address, Env, Vec};

use crate::events;
use crate::storage;
use crate::types::SaleConfig;
use crate::Error;

/// Fails with `Unauthorized` unless `caller` is the configured owner.
pub fn require_owner(config: &SaleConfig, caller: &Address) -> Result<(), Error> {
    if *caller != config.owner {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Fails with `NotAllowlisted` unless `address` was authorized by the owner.
pub fn require_allowed(env: &Env, address: &Address) -> Result<(), Error> {
    if !storage::is_allowed(env, address) {
        return Err(Error::NotAllowlisted);
    }
    Ok(())
}

/// Mark every address in `addresses` as allowed, in order.
///
/// Repeated addresses are simply set again; each write emits one event.
pub fn authorize(env: &Env, addresses: &Vec<Address>) {
    for address in addresses.iter() {
        storage::set_allowed(env, &address);
        events::emit_address_allowed(env, address);
    }
}

pub fn is_allowed(env: &Env, address: &Address) -> bool {
    storage::is_allowed(env, address)
}
