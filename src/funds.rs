//! Movement of stake token value in and out of the contract.

use soroban_sdk::{log, token, Address, Env};

/// Outcome of an outbound payment.
///
/// Refund and fee call sites fold a bounced amount back into the handle's
/// stake; withdrawal call sites turn it into `FailedToTransfer`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Payout {
    Sent,
    Bounced,
}

pub struct Funds<'a> {
    env: &'a Env,
    token: token::Client<'a>,
}

impl<'a> Funds<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Self {
            env,
            token: token::Client::new(env, token),
        }
    }

    /// Pull value attached by `from` into the contract.
    ///
    /// A failed pull aborts the whole invocation.
    pub fn collect(&self, from: &Address, value: i128) {
        if value > 0 {
            self.token
                .transfer(from, &self.env.current_contract_address(), &value);
        }
    }

    /// Pay `amount` out of the contract. Never panics on token failure.
    pub fn pay(&self, to: &Address, amount: i128) -> Payout {
        if amount <= 0 {
            return Payout::Sent;
        }

        match self
            .token
            .try_transfer(&self.env.current_contract_address(), to, &amount)
        {
            Ok(Ok(())) => Payout::Sent,
            _ => {
                log!(self.env, "payout bounced", to.clone(), amount);
                Payout::Bounced
            }
        }
    }
}
