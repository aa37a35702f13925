//! Non-transferable ownership registry.
//!
//! The registry is the single source of truth for who owns an identifier.
//! The ledger reads it for authorization and writes it only through
//! [`OwnerRegistry::mint`], [`OwnerRegistry::set_owner`] and
//! [`OwnerRegistry::burn`]. There is no user-initiated transfer path.

use soroban_sdk::{Address, Env};

use crate::codec::HandleId;
use crate::storage::{bump, read, HandleKey};
use crate::HandleError;

/// Ownership capability consumed by the ledger.
pub trait OwnerRegistry {
    /// Current owner of `id`, if any.
    fn owner_of(&self, id: &HandleId) -> Option<Address>;

    /// Assign a fresh identifier to `to`. Fails if `id` is already owned.
    fn mint(&self, id: &HandleId, to: &Address) -> Result<(), HandleError>;

    /// Move an owned identifier to `to`. Only the auction claim calls this.
    fn set_owner(&self, id: &HandleId, to: &Address);

    /// Drop ownership of `id`.
    fn burn(&self, id: &HandleId);
}

/// Registry backed by the contract's persistent storage.
pub struct TokenRegistry<'a> {
    env: &'a Env,
}

impl<'a> TokenRegistry<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Number of handles `owner` currently holds.
    pub fn balance(&self, owner: &Address) -> u32 {
        self.env
            .storage()
            .persistent()
            .get(&HandleKey::Balance(owner.clone()))
            .unwrap_or(0)
    }

    fn set_balance(&self, owner: &Address, balance: u32) {
        let key = HandleKey::Balance(owner.clone());
        if balance == 0 {
            self.env.storage().persistent().remove(&key);
        } else {
            self.env.storage().persistent().set(&key, &balance);
            bump(self.env, &key);
        }
    }

    fn credit(&self, owner: &Address) {
        self.set_balance(owner, self.balance(owner) + 1);
    }

    fn debit(&self, owner: &Address) {
        self.set_balance(owner, self.balance(owner).saturating_sub(1));
    }

    fn write_owner(&self, id: &HandleId, owner: &Address) {
        let key = HandleKey::Owner(id.clone());
        self.env.storage().persistent().set(&key, owner);
        bump(self.env, &key);
    }
}

impl OwnerRegistry for TokenRegistry<'_> {
    fn owner_of(&self, id: &HandleId) -> Option<Address> {
        read(self.env, &HandleKey::Owner(id.clone()))
    }

    fn mint(&self, id: &HandleId, to: &Address) -> Result<(), HandleError> {
        if self.owner_of(id).is_some() {
            return Err(HandleError::HandleNotAvailable);
        }

        self.write_owner(id, to);
        self.credit(to);
        Ok(())
    }

    fn set_owner(&self, id: &HandleId, to: &Address) {
        if let Some(previous) = self.owner_of(id) {
            self.debit(&previous);
        }

        self.write_owner(id, to);
        self.credit(to);
    }

    fn burn(&self, id: &HandleId) {
        if let Some(previous) = self.owner_of(id) {
            self.debit(&previous);
            self.env
                .storage()
                .persistent()
                .remove(&HandleKey::Owner(id.clone()));
        }
    }
}
