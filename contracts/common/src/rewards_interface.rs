//! Capability the ledger exposes to the reward-issuing collaborator.
//!
//! A reward minter depends only on this trait (through the generated
//! [`RewardLedgerClient`]); it never links against the ledger contract, and
//! the ledger never calls back into the minter.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "RewardLedgerClient")]
pub trait RewardLedgerInterface {
    /// Rewards accrued by `account` as of the current ledger time.
    fn earned(env: Env, account: Address) -> i128;

    /// Settles `account`, zeroes its accrued rewards and returns the amount
    /// the minter must issue. Only the registered minter may call this.
    fn settle_rewards(env: Env, minter: Address, account: Address) -> i128;
}
