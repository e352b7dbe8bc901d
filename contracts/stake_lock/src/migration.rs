//! # Versioned state layout
//!
//! | Version | Layout                                                       |
//! |---------|--------------------------------------------------------------|
//! | 1       | Pool scalars under `TOT_STK`, `RWD_RATE`, `RPT`, `LAST_UPD`; |
//! |         | lock period under `LOCK_PER`;                                |
//! |         | per-account `(STK, a)`, `(RPT_PAID, a)`, `(ERND, a)`         |
//! | 2       | `POOL` holds a [`PoolState`]; `POLICY` holds a               |
//! |         | [`PolicyConfig`]; `(POS, a)` holds a `Position`              |
//!
//! A contract without a `VERSION` entry is on version 1. Version 1 had no
//! policy record and no signer, so [`migrate`] builds one from `LOCK_PER` and
//! the signer the admin supplies. Pool data moves in [`migrate`]; account
//! data moves lazily the next time each account is written (see
//! `storage::load_position`).

use soroban_sdk::{BytesN, Env, I256};

use crate::{
    errors::ContractError,
    policy::{PolicyConfig, RewardModel},
    rewards::PoolState,
    storage::{
        self, LEGACY_LAST_UPDATE, LEGACY_LOCK_PERIOD, LEGACY_REWARD_PER_SHARE,
        LEGACY_REWARD_RATE, LEGACY_TOTAL_STAKED, VERSION,
    },
};

pub const CURRENT_VERSION: u32 = 2;

pub fn stored_version(env: &Env) -> u32 {
    env.storage().instance().get(&VERSION).unwrap_or(1)
}

pub fn set_current_version(env: &Env) {
    env.storage().instance().set(&VERSION, &CURRENT_VERSION);
}

/// Upgrades stored state to [`CURRENT_VERSION`] and returns it.
pub fn migrate(env: &Env, signer: BytesN<20>) -> Result<u32, ContractError> {
    let version = stored_version(env);
    if version >= CURRENT_VERSION {
        return Err(ContractError::AlreadyMigrated);
    }

    if version == 1 {
        migrate_v1_to_v2(env, signer);
    }

    set_current_version(env);
    Ok(CURRENT_VERSION)
}

fn migrate_v1_to_v2(env: &Env, signer: BytesN<20>) {
    let instance = env.storage().instance();
    let pool = PoolState {
        total_staked: instance.get(&LEGACY_TOTAL_STAKED).unwrap_or(0),
        reward_rate: instance.get(&LEGACY_REWARD_RATE).unwrap_or(0),
        reward_per_share: I256::from_i128(
            env,
            instance.get(&LEGACY_REWARD_PER_SHARE).unwrap_or(0),
        ),
        last_update: instance
            .get(&LEGACY_LAST_UPDATE)
            .unwrap_or(env.ledger().timestamp()),
        // Version 1 only knew flat-rate emission.
        period_finish: None,
    };

    // Version 1 had no switch; it accepted stakes from deployment on.
    let mut policy = PolicyConfig::new(signer, RewardModel::FlatRate);
    policy.enabled = true;
    policy.lock_duration = instance.get(&LEGACY_LOCK_PERIOD).unwrap_or(0);

    instance.remove(&LEGACY_TOTAL_STAKED);
    instance.remove(&LEGACY_REWARD_RATE);
    instance.remove(&LEGACY_REWARD_PER_SHARE);
    instance.remove(&LEGACY_LAST_UPDATE);
    instance.remove(&LEGACY_LOCK_PERIOD);

    storage::save_policy(env, &policy);
    storage::save_pool(env, &pool);
}
