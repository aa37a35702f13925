//! Event emission helpers for the handle auction contract.
//!
//! Every event is topic'd by its name and the handle string so indexers can
//! follow one handle's history. Payloads end with the ledger timestamp.

use soroban_sdk::{Address, Env, String, Symbol};

fn topics(env: &Env, name: &str, handle: &String) -> (Symbol, String) {
    (Symbol::new(env, name), handle.clone())
}

/// Emit an event when a handle is minted.
pub fn emit_minted(
    env: &Env,
    handle: &String,
    owner: &Address,
    amount: i128,
    fee: i128,
    frontend: &Option<Address>,
) {
    env.events().publish(
        topics(env, "minted", handle),
        (
            owner.clone(),
            amount,
            fee,
            frontend.clone(),
            env.ledger().timestamp(),
        ),
    );
}

/// Emit an event when a handle's uri changes.
pub fn emit_updated(env: &Env, handle: &String, owner: &Address, uri: &String) {
    env.events().publish(
        topics(env, "updated", handle),
        (owner.clone(), uri.clone(), env.ledger().timestamp()),
    );
}

/// Emit an event when stake is added to a handle.
pub fn emit_deposited(
    env: &Env,
    handle: &String,
    from: &Address,
    amount: i128,
    fee: i128,
    frontend: &Option<Address>,
) {
    env.events().publish(
        topics(env, "deposited", handle),
        (
            from.clone(),
            amount,
            fee,
            frontend.clone(),
            env.ledger().timestamp(),
        ),
    );
}

/// Emit an event when a deposit covers and cancels a bid.
pub fn emit_bid_covered(
    env: &Env,
    handle: &String,
    from: &Address,
    bidder: &Address,
    refund: i128,
    stake: i128,
) {
    env.events().publish(
        topics(env, "bid_covered", handle),
        (
            from.clone(),
            bidder.clone(),
            refund,
            stake,
            env.ledger().timestamp(),
        ),
    );
}

/// Emit an event when a bid is placed.
pub fn emit_bid_placed(
    env: &Env,
    handle: &String,
    bidder: &Address,
    amount: i128,
    outbid: &Option<Address>,
    fee: i128,
    frontend: &Option<Address>,
) {
    env.events().publish(
        topics(env, "bid_placed", handle),
        (
            bidder.clone(),
            amount,
            outbid.clone(),
            fee,
            frontend.clone(),
            env.ledger().timestamp(),
        ),
    );
}

/// Emit an event when a bidder retracts.
pub fn emit_bid_retracted(
    env: &Env,
    handle: &String,
    bidder: &Address,
    refund: i128,
    penalty: i128,
    fee: i128,
    frontend: &Option<Address>,
) {
    env.events().publish(
        topics(env, "bid_retracted", handle),
        (
            bidder.clone(),
            refund,
            penalty,
            fee,
            frontend.clone(),
            env.ledger().timestamp(),
        ),
    );
}

/// Emit an event when the winning bidder takes over a handle.
pub fn emit_claimed(
    env: &Env,
    handle: &String,
    from: &Address,
    to: &Address,
    stake: i128,
    refund: i128,
) {
    env.events().publish(
        topics(env, "claimed", handle),
        (
            from.clone(),
            to.clone(),
            stake,
            refund,
            env.ledger().timestamp(),
        ),
    );
}

/// Emit an event when an owner withdraws part of the stake.
pub fn emit_withdrawn(env: &Env, handle: &String, owner: &Address, amount: i128, stake: i128) {
    env.events().publish(
        topics(env, "withdrawn", handle),
        (owner.clone(), amount, stake, env.ledger().timestamp()),
    );
}

/// Emit an event when a handle is burned.
pub fn emit_burned(
    env: &Env,
    handle: &String,
    owner: &Address,
    payout: i128,
    refunded: &Option<Address>,
) {
    env.events().publish(
        topics(env, "burned", handle),
        (
            owner.clone(),
            payout,
            refunded.clone(),
            env.ledger().timestamp(),
        ),
    );
}

/// Emit an event when a refund or fee could not be paid and was folded
/// into the handle's stake.
pub fn emit_payout_folded(env: &Env, handle: &String, to: &Address, amount: i128) {
    env.events().publish(
        topics(env, "payout_folded", handle),
        (to.clone(), amount, env.ledger().timestamp()),
    );
}
