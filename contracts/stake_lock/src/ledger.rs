//! Per-account balances, the pool total and the time-lock.
//!
//! Callers settle rewards (see [`crate::rewards::settle`]) before calling
//! [`deposit`] or [`withdraw`], so accrual for the elapsed period is always
//! computed against the pre-mutation balance.

use soroban_sdk::{contracttype, Env, I256};

use crate::{errors::ContractError, policy::PolicyConfig, rewards::PoolState};

/// One account's stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    /// As-of timestamp of the authorization behind the latest deposit.
    pub last_deposit_at: u64,
    /// Nothing is withdrawable before this ledger time.
    pub unlock_at: u64,
    pub reward_per_share_paid: I256,
    /// Settled, unclaimed rewards.
    pub rewards: i128,
}

impl Position {
    /// An empty position that has never been settled.
    pub fn new(env: &Env) -> Self {
        Self {
            amount: 0,
            last_deposit_at: 0,
            unlock_at: 0,
            reward_per_share_paid: I256::from_i32(env, 0),
            rewards: 0,
        }
    }
}

/// Withdrawable part of `position` at ledger time `now`.
pub fn available_balance(position: &Position, now: u64) -> i128 {
    if now >= position.unlock_at {
        position.amount
    } else {
        0
    }
}

/// Adds `amount` to `position`.
///
/// `as_of` is the timestamp carried by the signed authorization; the lock
/// runs `lock_duration` seconds from it and a later deposit can only extend
/// an existing lock.
pub fn deposit(
    policy: &PolicyConfig,
    pool: &mut PoolState,
    position: &mut Position,
    amount: i128,
    as_of: u64,
) -> Result<(), ContractError> {
    if !policy.enabled {
        return Err(ContractError::Disabled);
    }
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }

    let new_amount = position
        .amount
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if new_amount < policy.min_stake {
        return Err(ContractError::BelowMinimum);
    }
    let new_total = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    position.amount = new_amount;
    position.last_deposit_at = as_of;
    position.unlock_at = position
        .unlock_at
        .max(as_of.saturating_add(policy.lock_duration));
    pool.total_staked = new_total;
    Ok(())
}

/// Removes `amount` from `position`.
///
/// A withdrawal that empties the position is always accepted. One that
/// leaves a remainder must be at least `min_unlock` and must not leave less
/// than `min_stake` behind.
pub fn withdraw(
    policy: &PolicyConfig,
    pool: &mut PoolState,
    position: &mut Position,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    if !policy.enabled {
        return Err(ContractError::Disabled);
    }
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    if amount > available_balance(position, now) {
        return Err(ContractError::InsufficientAvailable);
    }

    let remaining = position.amount - amount;
    if remaining > 0 && (amount < policy.min_unlock || remaining < policy.min_stake) {
        return Err(ContractError::BelowMinimum);
    }

    position.amount = remaining;
    pool.total_staked -= amount;
    Ok(())
}
