//! # Soroban Handle Auction
//!
//! Staked handle registry with a built-in English auction for the Soroban
//! blockchain.
//!
//! Every handle is bound non-transferably to one owner and backed by a stake
//! held in the contract. Anyone can challenge an owner by bidding exactly
//! twice the current price. Features include:
//!
//! - Validated handles (`[a-z0-9_-]{3,32}`, no leading/trailing `-` or `_`)
//! - Owner-editable profile uri
//! - 30 day auctions with forced doubling raises
//! - 3 day claim window for the winning bidder
//! - Retraction with a penalty proportional to the days left
//! - Covering deposits that cancel a bid
//! - 90 day hold after a burn
//! - Optional frontend fees on every funded call
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Register a handle with a stake of 100 and a fee of 5 for the frontend
//! client.mint(&caller, &handle, &uri, &100, &105, &Some(frontend));
//!
//! // Challenge it
//! client.bid(&challenger, &handle, &200, &200, &None);
//!
//! // Defend it
//! client.deposit(&caller, &handle, &100, &100, &None);
//! ```

#![no_std]

mod auction;
mod codec;
mod events;
mod funds;
mod records;
mod registry;
mod storage;

pub use auction::{AUCTION_WINDOW, CLAIM_WINDOW, DAY, HOLD_WINDOW};
pub use codec::{is_valid_handle, HandleId, MAX_HANDLE_LENGTH, MIN_HANDLE_LENGTH};
pub use records::{Bid, HandleData, Registration};
pub use storage::HandleKey;

use soroban_sdk::{
    contract, contracterror, contractimpl, log, Address, BytesN, Env, String, Vec,
};

use crate::auction::AuctionIndex;
use crate::events::*;
use crate::funds::{Funds, Payout};
use crate::registry::{OwnerRegistry, TokenRegistry};

/// Error codes for the handle auction contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum HandleError {
    /// Contract has already been initialized.
    AlreadyInitialized = 1,
    /// Contract has not been initialized.
    NotInitialized = 2,
    /// Handle format is invalid.
    InvalidHandle = 3,
    /// Auction index range is reversed or out of bounds.
    InvalidIndexRange = 4,
    /// Value and amount must both be positive.
    AmountRequired = 5,
    /// Amount does not match what the operation requires.
    InvalidAmount = 6,
    /// A fee was attached without a frontend to receive it.
    InvalidFrontendAddress = 7,
    /// Caller does not own the handle.
    NotHandleOwner = 8,
    /// Caller is not the current bidder.
    NotWinningBidder = 9,
    /// Caller already holds the current bid.
    AlreadyBidded = 10,
    /// Handle is registered or still on hold.
    HandleNotAvailable = 11,
    /// Handle has no owner.
    HandleNotRegistered = 12,
    /// A bid is still binding.
    AuctionOngoing = 13,
    /// The auction has closed and the claim window is running.
    AuctionClosed = 14,
    /// The claim window has elapsed.
    ClaimExpired = 15,
    /// An owner payout could not be delivered.
    FailedToTransfer = 16,
    /// Handles cannot be transferred or approved by their owners.
    NonTransferable = 17,
}

/// Handle being operated on, in both of its forms.
struct Target {
    id: HandleId,
    name: String,
}

impl Target {
    fn parse(env: &Env, handle: String) -> Result<Self, HandleError> {
        let id = codec::encode(env, &handle).map_err(|e| {
            log!(env, "invalid handle", handle.clone());
            e
        })?;
        Ok(Self { id, name: handle })
    }
}

#[contract]
pub struct HandleAuctionContract;

#[contractimpl]
impl HandleAuctionContract {
    // ========== Initialization ==========

    /// Initialize the contract with an admin and the stake token.
    ///
    /// `token` is the Stellar Asset Contract every stake, bid and fee is
    /// paid in. This must be called once before any other operation.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), HandleError> {
        if storage::is_initialized(&env) {
            return Err(HandleError::AlreadyInitialized);
        }

        admin.require_auth();
        env.storage().instance().set(&HandleKey::Admin, &admin);
        env.storage().instance().set(&HandleKey::Token, &token);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Get the admin address.
    pub fn admin(env: Env) -> Result<Address, HandleError> {
        storage::admin(&env).ok_or(HandleError::NotInitialized)
    }

    /// Get the stake token address.
    pub fn token(env: Env) -> Result<Address, HandleError> {
        storage::token(&env).ok_or(HandleError::NotInitialized)
    }

    // ========== Registration ==========

    /// Register an available handle to `caller`.
    ///
    /// # Arguments
    /// * `caller` - Address registering the handle, pays `value`
    /// * `handle` - Handle to register
    /// * `uri` - Profile pointer
    /// * `amount` - Portion of `value` that becomes the stake
    /// * `value` - Total attached; `value - amount` goes to `frontend`
    /// * `frontend` - Fee recipient, required whenever a fee is attached
    ///
    /// # Errors
    /// - `InvalidHandle` if the handle format is invalid
    /// - `HandleNotAvailable` if it is registered or on hold
    /// - `AmountRequired`, `InvalidFrontendAddress`, `InvalidAmount` per the funding rules
    pub fn mint(
        env: Env,
        caller: Address,
        handle: String,
        uri: String,
        amount: i128,
        value: i128,
        frontend: Option<Address>,
    ) -> Result<(), HandleError> {
        caller.require_auth();
        let funds = Self::funds(&env)?;
        let target = Target::parse(&env, handle)?;
        let registry = TokenRegistry::new(&env);
        let now = env.ledger().timestamp();

        if !Self::available(&env, &registry, &target.id, now) {
            log!(&env, "handle not available", target.name.clone());
            return Err(HandleError::HandleNotAvailable);
        }

        let fee = Self::check_funding(&env, amount, value, &frontend)?;
        funds.collect(&caller, value);

        registry.mint(&target.id, &caller)?;
        storage::remove_hold(&env, &target.id);

        let mut registration = Registration::new(now, uri);
        Self::add_stake(
            &env,
            &funds,
            &target,
            &mut registration,
            &caller,
            amount,
            fee,
            &frontend,
        );
        storage::set_registration(&env, &target.id, &registration);

        emit_minted(&env, &target.name, &caller, amount, fee, &frontend);
        Ok(())
    }

    /// Replace the profile uri of an owned handle.
    pub fn update(env: Env, caller: Address, handle: String, uri: String) -> Result<(), HandleError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        let target = Target::parse(&env, handle)?;

        let mut registration = Self::require_owner(&env, &target, &caller)?;
        registration.uri = uri.clone();
        storage::set_registration(&env, &target.id, &registration);

        emit_updated(&env, &target.name, &caller, &uri);
        Ok(())
    }

    // ========== Auction ==========

    /// Bid for a registered handle.
    ///
    /// `amount` must be exactly twice the current price: the binding bid if
    /// there is one, the owner's stake otherwise. The outbid bidder is
    /// refunded in full.
    ///
    /// # Errors
    /// - `HandleNotRegistered` if nobody owns the handle
    /// - `AuctionClosed` during the claim window
    /// - `AlreadyBidded` if `caller` holds the present bid
    /// - `InvalidAmount` unless `amount` doubles the current price
    pub fn bid(
        env: Env,
        caller: Address,
        handle: String,
        amount: i128,
        value: i128,
        frontend: Option<Address>,
    ) -> Result<(), HandleError> {
        caller.require_auth();
        let funds = Self::funds(&env)?;
        let target = Target::parse(&env, handle)?;
        let fee = Self::check_funding(&env, amount, value, &frontend)?;
        let now = env.ledger().timestamp();

        let mut registration =
            storage::registration(&env, &target.id).ok_or(HandleError::HandleNotRegistered)?;
        let previous = storage::bid(&env, &target.id);

        if auction::can_claim(previous.as_ref(), now) {
            return Err(HandleError::AuctionClosed);
        }

        if let Some(previous) = &previous {
            if previous.bidder == caller {
                return Err(HandleError::AlreadyBidded);
            }
        }

        let price = auction::current_price(&registration, previous.as_ref(), now);
        let required = price.checked_mul(2).ok_or(HandleError::InvalidAmount)?;
        if amount != required {
            log!(&env, "bid must double the price", target.name.clone(), required, amount);
            return Err(HandleError::InvalidAmount);
        }

        funds.collect(&caller, value);

        if previous.is_none() {
            AuctionIndex::new(&env).insert(&target.id);
        }
        storage::set_bid(
            &env,
            &target.id,
            &Bid {
                bidder: caller.clone(),
                amount,
                placed_at: now,
            },
        );

        let outbid = previous.map(|previous| {
            Self::refund_or_fold(
                &env,
                &funds,
                &target,
                &mut registration,
                &previous.bidder,
                previous.amount,
            );
            previous.bidder
        });
        Self::route_fee(&env, &funds, &target, &mut registration, &frontend, fee);
        storage::set_registration(&env, &target.id, &registration);

        emit_bid_placed(&env, &target.name, &caller, amount, &outbid, fee, &frontend);
        Ok(())
    }

    /// Withdraw the present bid.
    ///
    /// While the auction is open the bidder forfeits
    /// `amount * whole_days_left / 30` to the owner's stake. Once the
    /// auction has closed the full amount is returned. `value` is an
    /// optional frontend fee.
    pub fn retract(
        env: Env,
        caller: Address,
        handle: String,
        value: i128,
        frontend: Option<Address>,
    ) -> Result<(), HandleError> {
        caller.require_auth();
        let funds = Self::funds(&env)?;
        let target = Target::parse(&env, handle)?;
        let now = env.ledger().timestamp();

        let bid = match storage::bid(&env, &target.id) {
            Some(bid) if bid.bidder == caller => bid,
            _ => return Err(HandleError::NotWinningBidder),
        };
        if value < 0 {
            return Err(HandleError::InvalidAmount);
        }
        if value > 0 && frontend.is_none() {
            return Err(HandleError::InvalidFrontendAddress);
        }
        let mut registration =
            storage::registration(&env, &target.id).ok_or(HandleError::HandleNotRegistered)?;

        let penalty = auction::retract_penalty(&bid, now);
        let refund = bid.amount - penalty;

        funds.collect(&caller, value);

        registration.stake += penalty;
        storage::remove_bid(&env, &target.id);
        AuctionIndex::new(&env).remove(&target.id);

        Self::pay_or_fail(&env, &funds, &caller, refund)?;
        Self::route_fee(&env, &funds, &target, &mut registration, &frontend, value);
        storage::set_registration(&env, &target.id, &registration);

        emit_bid_retracted(&env, &target.name, &caller, refund, penalty, value, &frontend);
        Ok(())
    }

    /// Take over a handle after winning its auction.
    ///
    /// Only the bidder can claim, only after the auction window closes and
    /// only until the claim window runs out. The previous owner gets their
    /// whole stake back and the bid becomes the new stake.
    pub fn claim(env: Env, caller: Address, handle: String, uri: String) -> Result<(), HandleError> {
        caller.require_auth();
        let funds = Self::funds(&env)?;
        let target = Target::parse(&env, handle)?;
        let registry = TokenRegistry::new(&env);
        let now = env.ledger().timestamp();

        let bid = match storage::bid(&env, &target.id) {
            Some(bid) if bid.bidder == caller => bid,
            _ => return Err(HandleError::NotWinningBidder),
        };
        if auction::is_auction_open(Some(&bid), now) {
            return Err(HandleError::AuctionOngoing);
        }
        if !auction::can_claim(Some(&bid), now) {
            log!(&env, "claim window elapsed", target.name.clone(), bid.placed_at);
            return Err(HandleError::ClaimExpired);
        }

        let previous_owner = registry
            .owner_of(&target.id)
            .ok_or(HandleError::HandleNotRegistered)?;
        let mut registration =
            storage::registration(&env, &target.id).ok_or(HandleError::HandleNotRegistered)?;
        let refund = registration.stake;

        registry.set_owner(&target.id, &caller);
        registration.stake = bid.amount;
        registration.uri = uri;
        storage::remove_bid(&env, &target.id);
        AuctionIndex::new(&env).remove(&target.id);

        Self::refund_or_fold(&env, &funds, &target, &mut registration, &previous_owner, refund);
        storage::set_registration(&env, &target.id, &registration);

        emit_claimed(&env, &target.name, &previous_owner, &caller, bid.amount, refund);
        Ok(())
    }

    // ========== Stake ==========

    /// Add stake to a registered handle.
    ///
    /// Anyone may deposit. If the resulting stake reaches the amount of the
    /// present bid, valid or stale, the bid is cancelled and refunded.
    pub fn deposit(
        env: Env,
        caller: Address,
        handle: String,
        amount: i128,
        value: i128,
        frontend: Option<Address>,
    ) -> Result<(), HandleError> {
        caller.require_auth();
        let funds = Self::funds(&env)?;
        let target = Target::parse(&env, handle)?;

        let mut registration =
            storage::registration(&env, &target.id).ok_or(HandleError::HandleNotRegistered)?;
        let fee = Self::check_funding(&env, amount, value, &frontend)?;

        funds.collect(&caller, value);
        Self::add_stake(
            &env,
            &funds,
            &target,
            &mut registration,
            &caller,
            amount,
            fee,
            &frontend,
        );
        storage::set_registration(&env, &target.id, &registration);

        emit_deposited(&env, &target.name, &caller, amount, fee, &frontend);
        Ok(())
    }

    /// Withdraw part of the stake.
    ///
    /// At least one unit must stay staked; the full stake only comes back
    /// through `burn`. Blocked while a bid binds.
    pub fn withdraw(env: Env, caller: Address, handle: String, amount: i128) -> Result<(), HandleError> {
        caller.require_auth();
        let funds = Self::funds(&env)?;
        let target = Target::parse(&env, handle)?;
        let now = env.ledger().timestamp();

        let mut registration = Self::require_owner(&env, &target, &caller)?;
        if amount <= 0 {
            return Err(HandleError::AmountRequired);
        }
        if amount >= registration.stake {
            log!(&env, "withdraw must leave stake", target.name.clone(), registration.stake, amount);
            return Err(HandleError::InvalidAmount);
        }
        if auction::is_bid_valid(storage::bid(&env, &target.id).as_ref(), now) {
            return Err(HandleError::AuctionOngoing);
        }

        registration.stake -= amount;
        storage::set_registration(&env, &target.id, &registration);
        Self::pay_or_fail(&env, &funds, &caller, amount)?;

        emit_withdrawn(&env, &target.name, &caller, amount, registration.stake);
        Ok(())
    }

    /// Give up a handle.
    ///
    /// A present bid is refunded in full, the remaining stake is paid to
    /// the owner and the handle goes on hold for `HOLD_WINDOW`.
    pub fn burn(env: Env, caller: Address, handle: String) -> Result<(), HandleError> {
        caller.require_auth();
        let funds = Self::funds(&env)?;
        let target = Target::parse(&env, handle)?;
        let registry = TokenRegistry::new(&env);

        let mut registration = Self::require_owner(&env, &target, &caller)?;

        let refunded = storage::bid(&env, &target.id).map(|bid| {
            storage::remove_bid(&env, &target.id);
            AuctionIndex::new(&env).remove(&target.id);
            Self::refund_or_fold(&env, &funds, &target, &mut registration, &bid.bidder, bid.amount);
            bid.bidder
        });

        storage::remove_registration(&env, &target.id);
        registry.burn(&target.id);
        storage::set_hold(&env, &target.id, env.ledger().timestamp());

        Self::pay_or_fail(&env, &funds, &caller, registration.stake)?;

        emit_burned(&env, &target.name, &caller, registration.stake, &refunded);
        Ok(())
    }

    // ========== Ownership Token ==========

    /// Ownership only changes through `claim`.
    pub fn transfer(env: Env, _from: Address, _to: Address, handle: String) -> Result<(), HandleError> {
        log!(&env, "handles are non-transferable", handle);
        Err(HandleError::NonTransferable)
    }

    /// Ownership cannot be delegated.
    pub fn approve(
        env: Env,
        _owner: Address,
        _spender: Address,
        handle: String,
    ) -> Result<(), HandleError> {
        log!(&env, "handles are non-transferable", handle);
        Err(HandleError::NonTransferable)
    }

    /// Get the owner of a handle.
    pub fn owner_of(env: Env, handle: String) -> Result<Option<Address>, HandleError> {
        let target = Target::parse(&env, handle)?;
        Ok(TokenRegistry::new(&env).owner_of(&target.id))
    }

    /// Number of handles owned by `owner`.
    pub fn balance(env: Env, owner: Address) -> u32 {
        TokenRegistry::new(&env).balance(&owner)
    }

    // ========== Queries ==========

    /// Get the profile uri of a registered handle.
    pub fn resolve(env: Env, handle: String) -> Result<String, HandleError> {
        let target = Target::parse(&env, handle)?;
        storage::registration(&env, &target.id)
            .map(|registration| registration.uri)
            .ok_or(HandleError::HandleNotRegistered)
    }

    /// Get the stake of a handle (zero if unregistered).
    pub fn stake_of(env: Env, handle: String) -> Result<i128, HandleError> {
        let target = Target::parse(&env, handle)?;
        Ok(storage::registration(&env, &target.id)
            .map(|registration| registration.stake)
            .unwrap_or(0))
    }

    /// Get the present bid, binding or not.
    pub fn bid_of(env: Env, handle: String) -> Result<Option<Bid>, HandleError> {
        let target = Target::parse(&env, handle)?;
        Ok(storage::bid(&env, &target.id))
    }

    /// Get the price the next bid must double.
    pub fn current_price(env: Env, handle: String) -> Result<i128, HandleError> {
        let target = Target::parse(&env, handle)?;
        let registration =
            storage::registration(&env, &target.id).ok_or(HandleError::HandleNotRegistered)?;
        let bid = storage::bid(&env, &target.id);
        Ok(auction::current_price(
            &registration,
            bid.as_ref(),
            env.ledger().timestamp(),
        ))
    }

    /// Check if the present bid is inside its auction or claim window.
    pub fn is_bid_valid(env: Env, handle: String) -> bool {
        Self::with_bid(&env, handle, auction::is_bid_valid)
    }

    /// Check if the handle's auction is open.
    pub fn is_auction_open(env: Env, handle: String) -> bool {
        Self::with_bid(&env, handle, auction::is_auction_open)
    }

    /// Check if the present bid can be claimed now.
    pub fn can_claim(env: Env, handle: String) -> bool {
        Self::with_bid(&env, handle, auction::can_claim)
    }

    /// Check if the handle was burned less than `HOLD_WINDOW` ago.
    pub fn is_on_hold(env: Env, handle: String) -> bool {
        match codec::encode(&env, &handle) {
            Ok(id) => auction::is_on_hold(storage::hold(&env, &id), env.ledger().timestamp()),
            Err(_) => false,
        }
    }

    /// Check if the handle has an owner.
    pub fn is_registered(env: Env, handle: String) -> bool {
        match codec::encode(&env, &handle) {
            Ok(id) => TokenRegistry::new(&env).owner_of(&id).is_some(),
            Err(_) => false,
        }
    }

    /// Check if a handle can be minted right now.
    pub fn is_available(env: Env, handle: String) -> bool {
        match codec::encode(&env, &handle) {
            Ok(id) => Self::available(
                &env,
                &TokenRegistry::new(&env),
                &id,
                env.ledger().timestamp(),
            ),
            Err(_) => false,
        }
    }

    /// Get the number of handles with a present bid.
    pub fn auctions_count(env: Env) -> u32 {
        AuctionIndex::new(&env).len()
    }

    /// Get auction views for index positions `start..end`.
    pub fn auction_range(env: Env, start: u32, end: u32) -> Result<Vec<HandleData>, HandleError> {
        let ids = AuctionIndex::new(&env).range(start, end)?;
        let mut views = Vec::new(&env);
        for id in ids.iter() {
            views.push_back(Self::auction_view(&env, &id));
        }
        Ok(views)
    }

    /// Get the registration view of a handle.
    pub fn handle_data(env: Env, handle: String) -> Result<HandleData, HandleError> {
        let target = Target::parse(&env, handle)?;
        Ok(Self::registration_view(&env, &target.id))
    }

    /// Get the registration view of an identifier.
    pub fn handle_data_by_id(env: Env, id: BytesN<32>) -> HandleData {
        Self::registration_view(&env, &id)
    }

    /// Get the auction view of a handle.
    pub fn auction_data(env: Env, handle: String) -> Result<HandleData, HandleError> {
        let target = Target::parse(&env, handle)?;
        Ok(Self::auction_view(&env, &target.id))
    }

    /// Get the identifier a handle encodes to.
    pub fn handle_id(env: Env, handle: String) -> Result<BytesN<32>, HandleError> {
        codec::encode(&env, &handle)
    }

    /// Get the handle an identifier was encoded from.
    pub fn handle_of(env: Env, id: BytesN<32>) -> String {
        codec::decode(&env, &id)
    }

    // ========== Admin Functions ==========

    /// Upgrade the contract WASM (admin only).
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), HandleError> {
        let admin = storage::admin(&env).ok_or(HandleError::NotInitialized)?;
        admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }
}

// ========== Internal Helpers ==========

impl HandleAuctionContract {
    fn require_initialized(env: &Env) -> Result<(), HandleError> {
        if !storage::is_initialized(env) {
            return Err(HandleError::NotInitialized);
        }
        storage::bump_instance(env);
        Ok(())
    }

    fn funds(env: &Env) -> Result<Funds<'_>, HandleError> {
        Self::require_initialized(env)?;
        let token = storage::token(env).ok_or(HandleError::NotInitialized)?;
        Ok(Funds::new(env, &token))
    }

    fn require_owner(
        env: &Env,
        target: &Target,
        caller: &Address,
    ) -> Result<Registration, HandleError> {
        if TokenRegistry::new(env).owner_of(&target.id).as_ref() != Some(caller) {
            return Err(HandleError::NotHandleOwner);
        }

        storage::registration(env, &target.id).ok_or(HandleError::HandleNotRegistered)
    }

    fn available(env: &Env, registry: &impl OwnerRegistry, id: &HandleId, now: u64) -> bool {
        registry.owner_of(id).is_none() && !auction::is_on_hold(storage::hold(env, id), now)
    }

    /// Validate attached value and return the frontend fee.
    fn check_funding(
        env: &Env,
        amount: i128,
        value: i128,
        frontend: &Option<Address>,
    ) -> Result<i128, HandleError> {
        if value <= 0 || amount <= 0 {
            return Err(HandleError::AmountRequired);
        }
        if value != amount && frontend.is_none() {
            return Err(HandleError::InvalidFrontendAddress);
        }
        if value < amount {
            log!(env, "value below amount", amount, value);
            return Err(HandleError::InvalidAmount);
        }
        Ok(value - amount)
    }

    /// Shared deposit routine used by `mint` and `deposit`.
    #[allow(clippy::too_many_arguments)]
    fn add_stake(
        env: &Env,
        funds: &Funds,
        target: &Target,
        registration: &mut Registration,
        from: &Address,
        amount: i128,
        fee: i128,
        frontend: &Option<Address>,
    ) {
        registration.stake += amount;

        if let Some(bid) = storage::bid(env, &target.id) {
            if registration.stake >= bid.amount {
                storage::remove_bid(env, &target.id);
                AuctionIndex::new(env).remove(&target.id);
                Self::refund_or_fold(env, funds, target, registration, &bid.bidder, bid.amount);
                emit_bid_covered(env, &target.name, from, &bid.bidder, bid.amount, registration.stake);
            }
        }

        Self::route_fee(env, funds, target, registration, frontend, fee);
    }

    /// Pay a frontend fee. Funding checks guarantee a frontend whenever
    /// `fee` is non-zero.
    fn route_fee(
        env: &Env,
        funds: &Funds,
        target: &Target,
        registration: &mut Registration,
        frontend: &Option<Address>,
        fee: i128,
    ) {
        if let Some(frontend) = frontend {
            Self::refund_or_fold(env, funds, target, registration, frontend, fee);
        }
    }

    /// Pay a refund or fee, folding it into the stake if it bounces.
    fn refund_or_fold(
        env: &Env,
        funds: &Funds,
        target: &Target,
        registration: &mut Registration,
        to: &Address,
        amount: i128,
    ) {
        if funds.pay(to, amount) == Payout::Bounced {
            registration.stake += amount;
            emit_payout_folded(env, &target.name, to, amount);
        }
    }

    /// Pay an owner-initiated payout, failing the call if it bounces.
    fn pay_or_fail(env: &Env, funds: &Funds, to: &Address, amount: i128) -> Result<(), HandleError> {
        match funds.pay(to, amount) {
            Payout::Sent => Ok(()),
            Payout::Bounced => {
                log!(env, "owner payout failed", to.clone(), amount);
                Err(HandleError::FailedToTransfer)
            }
        }
    }

    fn with_bid(
        env: &Env,
        handle: String,
        predicate: fn(Option<&Bid>, u64) -> bool,
    ) -> bool {
        match codec::encode(env, &handle) {
            Ok(id) => predicate(storage::bid(env, &id).as_ref(), env.ledger().timestamp()),
            Err(_) => false,
        }
    }

    fn registration_view(env: &Env, id: &HandleId) -> HandleData {
        let name = codec::decode(env, id);
        match (
            storage::registration(env, id),
            TokenRegistry::new(env).owner_of(id),
        ) {
            (Some(registration), Some(owner)) => {
                HandleData::registration(name, &registration, owner)
            }
            _ => HandleData::empty(name),
        }
    }

    fn auction_view(env: &Env, id: &HandleId) -> HandleData {
        let name = codec::decode(env, id);
        match storage::bid(env, id) {
            Some(bid) => HandleData::auction(name, &bid),
            None => HandleData::empty(name),
        }
    }
}
