//! Auction windows, time predicates and the active-auction index.
//!
//! Windows are never scheduled. They are evaluated against the ledger
//! timestamp whenever an operation or a reader asks, so an expired bid may
//! still sit in storage until a later call clears it.

use soroban_sdk::{Env, Vec};

use crate::codec::HandleId;
use crate::records::{Bid, Registration};
use crate::storage::{bump, HandleKey};
use crate::HandleError;

pub const DAY: u64 = 86_400;

/// How long a bid can be outbid or retracted.
pub const AUCTION_WINDOW: u64 = 30 * DAY;

/// Grace period after the auction closes in which the bidder may claim.
pub const CLAIM_WINDOW: u64 = 3 * DAY;

/// Cooldown after a burn before the handle can be minted again.
pub const HOLD_WINDOW: u64 = 90 * DAY;

pub fn is_on_hold(hold: Option<u64>, now: u64) -> bool {
    match hold {
        Some(at) => now <= at.saturating_add(HOLD_WINDOW),
        None => false,
    }
}

pub fn is_auction_open(bid: Option<&Bid>, now: u64) -> bool {
    match bid {
        Some(bid) => now <= bid.placed_at.saturating_add(AUCTION_WINDOW),
        None => false,
    }
}

pub fn can_claim(bid: Option<&Bid>, now: u64) -> bool {
    match bid {
        Some(bid) => {
            let closes = bid.placed_at.saturating_add(AUCTION_WINDOW);
            closes < now && now <= closes.saturating_add(CLAIM_WINDOW)
        }
        None => false,
    }
}

/// Bid still binds: auction open or inside the claim window.
pub fn is_bid_valid(bid: Option<&Bid>, now: u64) -> bool {
    match bid {
        Some(bid) => {
            now <= bid
                .placed_at
                .saturating_add(AUCTION_WINDOW)
                .saturating_add(CLAIM_WINDOW)
        }
        None => false,
    }
}

/// Price a new bid must double.
pub fn current_price(registration: &Registration, bid: Option<&Bid>, now: u64) -> i128 {
    match bid {
        Some(bid) if is_bid_valid(Some(bid), now) => bid.amount,
        _ => registration.stake,
    }
}

/// Penalty kept from a retracting bidder.
///
/// Linear in the whole days left in the auction window; zero once the
/// auction is no longer open.
pub fn retract_penalty(bid: &Bid, now: u64) -> i128 {
    if !is_auction_open(Some(bid), now) {
        return 0;
    }

    let remaining_days = (bid.placed_at + AUCTION_WINDOW - now) / DAY;
    bid.amount * remaining_days as i128 / (AUCTION_WINDOW / DAY) as i128
}

/// Unordered set of identifiers with a present bid.
///
/// Each position of the dense array lives under its own key, with a slot
/// map for the reverse lookup. Insert and swap-and-pop removal touch a
/// constant number of entries regardless of how many auctions are open.
pub struct AuctionIndex<'a> {
    env: &'a Env,
}

impl<'a> AuctionIndex<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn set_len(&self, len: u32) {
        self.env
            .storage()
            .instance()
            .set(&HandleKey::AuctionCount, &len);
    }

    fn at(&self, position: u32) -> Option<HandleId> {
        self.env
            .storage()
            .persistent()
            .get(&HandleKey::AuctionAt(position))
    }

    fn set_at(&self, position: u32, id: &HandleId) {
        let key = HandleKey::AuctionAt(position);
        self.env.storage().persistent().set(&key, id);
        bump(self.env, &key);
    }

    fn slot(&self, id: &HandleId) -> Option<u32> {
        self.env
            .storage()
            .persistent()
            .get(&HandleKey::AuctionSlot(id.clone()))
    }

    fn set_slot(&self, id: &HandleId, slot: u32) {
        let key = HandleKey::AuctionSlot(id.clone());
        self.env.storage().persistent().set(&key, &slot);
        bump(self.env, &key);
    }

    pub fn len(&self) -> u32 {
        self.env
            .storage()
            .instance()
            .get(&HandleKey::AuctionCount)
            .unwrap_or(0)
    }

    pub fn contains(&self, id: &HandleId) -> bool {
        self.slot(id).is_some()
    }

    pub fn insert(&self, id: &HandleId) {
        if self.contains(id) {
            return;
        }

        let len = self.len();
        self.set_at(len, id);
        self.set_slot(id, len);
        self.set_len(len + 1);
    }

    pub fn remove(&self, id: &HandleId) {
        let Some(slot) = self.slot(id) else {
            return;
        };

        let last = self.len() - 1;
        if slot != last {
            if let Some(moved) = self.at(last) {
                self.set_at(slot, &moved);
                self.set_slot(&moved, slot);
            }
        }

        let storage = self.env.storage().persistent();
        storage.remove(&HandleKey::AuctionAt(last));
        storage.remove(&HandleKey::AuctionSlot(id.clone()));
        self.set_len(last);
    }

    /// Identifiers in positions `start..end`.
    pub fn range(&self, start: u32, end: u32) -> Result<Vec<HandleId>, HandleError> {
        if start > end || end > self.len() {
            return Err(HandleError::InvalidIndexRange);
        }

        let mut ids = Vec::new(self.env);
        for position in start..end {
            if let Some(id) = self.at(position) {
                ids.push_back(id);
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{contract, testutils::Address as _, Address, BytesN, String};

    #[contract]
    struct Host;

    fn bid_at(env: &Env, placed_at: u64, amount: i128) -> Bid {
        Bid {
            bidder: Address::generate(env),
            amount,
            placed_at,
        }
    }

    #[test]
    fn test_windows_are_exclusive() {
        let env = Env::default();
        let placed = 1_000;
        let bid = bid_at(&env, placed, 200);
        let closes = placed + AUCTION_WINDOW;
        let expires = closes + CLAIM_WINDOW;

        for now in [placed, closes - 1, closes, closes + 1, expires, expires + 1] {
            let open = is_auction_open(Some(&bid), now);
            let claim = can_claim(Some(&bid), now);
            assert!(!(open && claim));
            assert_eq!(is_bid_valid(Some(&bid), now), open || claim);
        }

        assert!(is_auction_open(Some(&bid), closes));
        assert!(!can_claim(Some(&bid), closes));
        assert!(can_claim(Some(&bid), closes + 1));
        assert!(can_claim(Some(&bid), expires));
        assert!(!is_bid_valid(Some(&bid), expires + 1));

        assert!(!is_auction_open(None, placed));
        assert!(!can_claim(None, closes + 1));
        assert!(!is_bid_valid(None, placed));
    }

    #[test]
    fn test_hold_window() {
        let burned = 5_000;
        assert!(!is_on_hold(None, burned));
        assert!(is_on_hold(Some(burned), burned));
        assert!(is_on_hold(Some(burned), burned + HOLD_WINDOW));
        assert!(!is_on_hold(Some(burned), burned + HOLD_WINDOW + 1));
    }

    #[test]
    fn test_current_price_falls_back_to_stake() {
        let env = Env::default();
        let registration = Registration {
            stake: 100,
            registered_at: 0,
            uri: String::from_str(&env, ""),
        };
        let bid = bid_at(&env, 10, 200);

        assert_eq!(current_price(&registration, None, 10), 100);
        assert_eq!(current_price(&registration, Some(&bid), 10), 200);
        let stale = 10 + AUCTION_WINDOW + CLAIM_WINDOW + 1;
        assert_eq!(current_price(&registration, Some(&bid), stale), 100);
    }

    #[test]
    fn test_retract_penalty() {
        let env = Env::default();
        let placed = 1_000;
        let bid = bid_at(&env, placed, 200);

        // 20 whole days left
        assert_eq!(retract_penalty(&bid, placed + 10 * DAY), 133);
        // 19 whole days left, partial day is floored
        assert_eq!(retract_penalty(&bid, placed + 10 * DAY + 1), 126);
        assert_eq!(retract_penalty(&bid, placed), 200);
        assert_eq!(retract_penalty(&bid, placed + AUCTION_WINDOW), 0);
        assert_eq!(retract_penalty(&bid, placed + AUCTION_WINDOW + 1), 0);
    }

    #[test]
    fn test_index_swap_and_pop() {
        let env = Env::default();
        let host = env.register(Host, ());
        let ids: [HandleId; 3] = [
            BytesN::from_array(&env, &[1u8; 32]),
            BytesN::from_array(&env, &[2u8; 32]),
            BytesN::from_array(&env, &[3u8; 32]),
        ];

        env.as_contract(&host, || {
            let index = AuctionIndex::new(&env);
            for id in ids.iter() {
                index.insert(id);
            }
            index.insert(&ids[0]);
            assert_eq!(index.len(), 3);

            index.remove(&ids[0]);
            assert_eq!(index.len(), 2);
            assert!(!index.contains(&ids[0]));

            let rest = index.range(0, 2).unwrap();
            assert!(rest.contains(&ids[1]));
            assert!(rest.contains(&ids[2]));

            index.remove(&ids[0]);
            index.remove(&ids[2]);
            index.remove(&ids[1]);
            assert_eq!(index.len(), 0);
        });
    }

    #[test]
    fn test_index_range_bounds() {
        let env = Env::default();
        let host = env.register(Host, ());

        env.as_contract(&host, || {
            let index = AuctionIndex::new(&env);
            index.insert(&BytesN::from_array(&env, &[9u8; 32]));

            assert_eq!(index.range(0, 0).unwrap().len(), 0);
            assert_eq!(index.range(0, 1).unwrap().len(), 1);
            assert_eq!(index.range(1, 0), Err(HandleError::InvalidIndexRange));
            assert_eq!(index.range(0, 2), Err(HandleError::InvalidIndexRange));
        });
    }

    #[test]
    fn test_index_slots_stay_dense() {
        let env = Env::default();
        let host = env.register(Host, ());
        let mut ids: Vec<HandleId> = Vec::new(&env);
        for n in 1..=40u8 {
            ids.push_back(BytesN::from_array(&env, &[n; 32]));
        }

        env.as_contract(&host, || {
            let index = AuctionIndex::new(&env);
            for id in ids.iter() {
                index.insert(&id);
            }
            // Front, middle, last and a repeat
            for n in [0u32, 17, 39, 17, 5] {
                index.remove(&ids.get_unchecked(n));
            }
            assert_eq!(index.len(), 36);

            for position in 0..index.len() {
                let id = index.at(position).unwrap();
                assert_eq!(index.slot(&id), Some(position));
            }
            assert_eq!(index.at(36), None);
            assert_eq!(index.range(30, 36).unwrap().len(), 6);
            for n in [0u32, 5, 17, 39] {
                assert!(!index.contains(&ids.get_unchecked(n)));
            }
        });
    }
}
