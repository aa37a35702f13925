//! Per-handle records and the reporting projection.

use soroban_sdk::{contracttype, Address, String};

/// Registration data for an owned handle.
///
/// Exists exactly while the ownership registry reports an owner for the
/// handle's identifier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Registration {
    /// Stake escrowed for the owner, in stake token units.
    pub stake: i128,

    /// Ledger timestamp of the mint.
    pub registered_at: u64,

    /// Opaque profile pointer, owner-mutable.
    pub uri: String,
}

impl Registration {
    /// Create a registration with an empty stake.
    pub fn new(registered_at: u64, uri: String) -> Self {
        Self {
            stake: 0,
            registered_at,
            uri,
        }
    }
}

/// A challenger's escrowed offer for a handle.
///
/// Whether the bid still binds is derived from `placed_at` and the
/// current ledger time, see [`crate::auction`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bid {
    pub bidder: Address,

    /// Always twice the price that was current when the bid was placed.
    pub amount: i128,

    pub placed_at: u64,
}

/// Flat view shared by the registration and auction read endpoints.
///
/// Registration view: `(stake, registered_at, owner)`.
/// Auction view: `(bid amount, placed_at, bidder)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandleData {
    pub amount: i128,
    pub time: u64,
    pub actor: Option<Address>,
    pub handle: String,
}

impl HandleData {
    pub fn empty(handle: String) -> Self {
        Self {
            amount: 0,
            time: 0,
            actor: None,
            handle,
        }
    }

    pub fn registration(handle: String, registration: &Registration, owner: Address) -> Self {
        Self {
            amount: registration.stake,
            time: registration.registered_at,
            actor: Some(owner),
            handle,
        }
    }

    pub fn auction(handle: String, bid: &Bid) -> Self {
        Self {
            amount: bid.amount,
            time: bid.placed_at,
            actor: Some(bid.bidder.clone()),
            handle,
        }
    }
}
