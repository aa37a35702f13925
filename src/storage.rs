//! Storage key definitions and accessors for the handle auction contract.

use soroban_sdk::{contracttype, Address, Env, TryFromVal, Val};

use crate::codec::HandleId;
use crate::records::{Bid, Registration};

/// Storage keys for the handle auction contract.
///
/// This enum defines all storage keys used by the contract.
#[contracttype]
#[derive(Clone, Debug)]
pub enum HandleKey {
    /// Contract administrator address.
    Admin,

    /// Stake token (Stellar Asset Contract) address.
    Token,

    /// Maps identifier to its owner. Written only by the ownership registry.
    Owner(HandleId),

    /// Number of handles an address currently owns.
    Balance(Address),

    /// Maps identifier to its Registration.
    Registration(HandleId),

    /// Maps identifier to the present Bid, if any.
    Bid(HandleId),

    /// Number of identifiers with a present bid (instance storage).
    AuctionCount,

    /// Identifier stored at a position of the dense auction array.
    AuctionAt(u32),

    /// Position of an identifier inside the dense auction array.
    AuctionSlot(HandleId),

    /// Timestamp of the last burn of an identifier.
    Hold(HandleId),
}

/// Time-to-live for persistent entries, in ledgers.
pub const HANDLE_TTL_THRESHOLD: u32 = 518400; // ~30 days
pub const HANDLE_TTL_EXTEND: u32 = 2592000; // ~150 days

/// Time-to-live for instance storage, in ledgers.
pub const INSTANCE_TTL_THRESHOLD: u32 = 518400; // ~30 days
pub const INSTANCE_TTL_EXTEND: u32 = 2592000; // ~150 days

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend a persistent entry so it outlives the longest window (hold).
pub fn bump(env: &Env, key: &HandleKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, HANDLE_TTL_THRESHOLD, HANDLE_TTL_EXTEND);
}

/// Read a persistent entry, extending it if present so handles that are
/// only ever read do not fall into archival.
pub fn read<V>(env: &Env, key: &HandleKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump(env, key);
    }
    value
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&HandleKey::Admin)
}

pub fn admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&HandleKey::Admin)
}

pub fn token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&HandleKey::Token)
}

pub fn registration(env: &Env, id: &HandleId) -> Option<Registration> {
    read(env, &HandleKey::Registration(id.clone()))
}

pub fn set_registration(env: &Env, id: &HandleId, registration: &Registration) {
    let key = HandleKey::Registration(id.clone());
    env.storage().persistent().set(&key, registration);
    bump(env, &key);
}

pub fn remove_registration(env: &Env, id: &HandleId) {
    env.storage()
        .persistent()
        .remove(&HandleKey::Registration(id.clone()));
}

pub fn bid(env: &Env, id: &HandleId) -> Option<Bid> {
    read(env, &HandleKey::Bid(id.clone()))
}

pub fn set_bid(env: &Env, id: &HandleId, bid: &Bid) {
    let key = HandleKey::Bid(id.clone());
    env.storage().persistent().set(&key, bid);
    bump(env, &key);
}

pub fn remove_bid(env: &Env, id: &HandleId) {
    env.storage().persistent().remove(&HandleKey::Bid(id.clone()));
}

pub fn hold(env: &Env, id: &HandleId) -> Option<u64> {
    env.storage().persistent().get(&HandleKey::Hold(id.clone()))
}

pub fn set_hold(env: &Env, id: &HandleId, at: u64) {
    let key = HandleKey::Hold(id.clone());
    env.storage().persistent().set(&key, &at);
    bump(env, &key);
}

pub fn remove_hold(env: &Env, id: &HandleId) {
    env.storage().persistent().remove(&HandleKey::Hold(id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{
        contract,
        testutils::{storage::Persistent as _, Ledger as _},
        BytesN, String,
    };

    #[contract]
    struct Host;

    #[test]
    fn test_reads_extend_live_entries() {
        let env = Env::default();
        let host = env.register(Host, ());
        let id: HandleId = BytesN::from_array(&env, &[4u8; 32]);
        let key = HandleKey::Registration(id.clone());

        env.as_contract(&host, || {
            bump_instance(&env);
            let registration = Registration::new(0, String::from_str(&env, ""));
            set_registration(&env, &id, &registration);
            assert_eq!(env.storage().persistent().get_ttl(&key), HANDLE_TTL_EXTEND);
        });

        // Just under the threshold
        let elapsed = HANDLE_TTL_EXTEND - HANDLE_TTL_THRESHOLD + 1;
        env.ledger().with_mut(|li| li.sequence_number += elapsed);

        env.as_contract(&host, || {
            assert_eq!(
                env.storage().persistent().get_ttl(&key),
                HANDLE_TTL_THRESHOLD - 1
            );
            assert!(registration(&env, &id).is_some());
            assert_eq!(env.storage().persistent().get_ttl(&key), HANDLE_TTL_EXTEND);

            // Absent entries are not touched
            assert!(bid(&env, &id).is_none());
        });
    }
}
