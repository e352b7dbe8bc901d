//! Pool-shared reward accounting.
//!
//! The pool emits `reward_rate` tokens per second in total, split pro-rata
//! by stake. Instead of touching every account, the pool keeps a running
//! `reward_per_share` (scaled by [`SCALE`]); each position stores the value
//! it was last settled at, and its pending reward is
//! `amount × (reward_per_share − paid) / SCALE`.
//!
//! Products are formed in 256-bit space before the single floor division, so
//! nothing is divided before it is multiplied. The accumulator itself stays
//! in 256 bits: a pool holding a few raw units at a high rate advances it by
//! more than `i128` can hold within seconds. Only amounts (`earned`) come
//! back to `i128`.

use soroban_sdk::{contracttype, Env, I256};

use crate::{errors::ContractError, ledger::Position, policy::RewardModel};

/// Fixed-point scale of every amount and of the accumulator (18 decimals).
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// Pool-global accrual state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub total_staked: i128,
    /// Tokens emitted per second across all stakers.
    pub reward_rate: i128,
    pub reward_per_share: I256,
    pub last_update: u64,
    /// End of the funded period; `None` emits at `reward_rate` indefinitely.
    pub period_finish: Option<u64>,
}

impl PoolState {
    pub fn new(env: &Env, model: RewardModel, now: u64) -> Self {
        Self {
            total_staked: 0,
            reward_rate: 0,
            reward_per_share: I256::from_i32(env, 0),
            last_update: now,
            period_finish: match model {
                RewardModel::FlatRate => None,
                RewardModel::FundedDuration => Some(now),
            },
        }
    }

    /// Latest instant at which rewards are still being emitted.
    pub fn last_time_reward_applicable(&self, now: u64) -> u64 {
        match self.period_finish {
            Some(finish) => now.min(finish),
            None => now,
        }
    }

    pub fn period_active(&self, now: u64) -> bool {
        self.period_finish.map_or(false, |finish| now < finish)
    }
}

fn wide(env: &Env, value: i128) -> I256 {
    I256::from_i128(env, value)
}

/// Accumulator value as if refreshed to `now`. Pure.
pub fn reward_per_share(env: &Env, pool: &PoolState, now: u64) -> I256 {
    let applicable = pool.last_time_reward_applicable(now);
    if pool.total_staked == 0 || applicable <= pool.last_update {
        return pool.reward_per_share.clone();
    }
    let elapsed = (applicable - pool.last_update) as i128;
    let delta = wide(env, elapsed)
        .mul(&wide(env, pool.reward_rate))
        .mul(&wide(env, SCALE))
        .div(&wide(env, pool.total_staked));
    pool.reward_per_share.add(&delta)
}

/// Brings the accumulator up to `now`.
///
/// With nothing staked only `last_update` moves, so an empty pool never
/// banks rewards for whoever stakes next.
pub fn refresh(env: &Env, pool: &mut PoolState, now: u64) {
    pool.reward_per_share = reward_per_share(env, pool, now);
    pool.last_update = pool
        .last_time_reward_applicable(now)
        .max(pool.last_update);
}

/// Settled plus pending reward of `position` against accumulator `rps`.
///
/// Fails only when the result itself does not fit an `i128` amount.
pub fn earned(env: &Env, position: &Position, rps: &I256) -> Result<i128, ContractError> {
    let pending = wide(env, position.amount)
        .mul(&rps.sub(&position.reward_per_share_paid))
        .div(&wide(env, SCALE))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)?;
    position
        .rewards
        .checked_add(pending)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Refreshes the pool and moves everything `position` has earned so far
/// into its settled balance. Must run before any change to `position.amount`.
pub fn settle(
    env: &Env,
    pool: &mut PoolState,
    position: &mut Position,
    now: u64,
) -> Result<(), ContractError> {
    refresh(env, pool, now);
    position.rewards = earned(env, position, &pool.reward_per_share)?;
    position.reward_per_share_paid = pool.reward_per_share.clone();
    Ok(())
}

/// Flat-rate model: replaces the pool-wide emission rate from `now` on.
pub fn set_flat_rate(env: &Env, pool: &mut PoolState, rate: i128, now: u64) {
    refresh(env, pool, now);
    pool.reward_rate = rate;
    pool.period_finish = None;
}

/// Funded model: adds `reward` to the budget and spreads whatever is left of
/// the running period plus the new budget over a fresh `duration`.
pub fn notify_reward_amount(
    env: &Env,
    pool: &mut PoolState,
    reward: i128,
    duration: u64,
    now: u64,
) -> Result<(), ContractError> {
    if duration == 0 {
        return Err(ContractError::InvalidConfig);
    }
    refresh(env, pool, now);

    let mut budget = reward;
    if let Some(finish) = pool.period_finish {
        if now < finish {
            let leftover = ((finish - now) as i128)
                .checked_mul(pool.reward_rate)
                .ok_or(ContractError::ArithmeticOverflow)?;
            budget = budget
                .checked_add(leftover)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
    }

    pool.reward_rate = budget / duration as i128;
    pool.last_update = now;
    pool.period_finish = Some(
        now.checked_add(duration)
            .ok_or(ContractError::ArithmeticOverflow)?,
    );
    Ok(())
}

/// Closes out accrual under the current model and starts `model` with no
/// emission until it is configured.
pub fn switch_model(env: &Env, pool: &mut PoolState, model: RewardModel, now: u64) {
    refresh(env, pool, now);
    pool.reward_rate = 0;
    pool.last_update = now;
    pool.period_finish = match model {
        RewardModel::FlatRate => None,
        RewardModel::FundedDuration => Some(now),
    };
}
