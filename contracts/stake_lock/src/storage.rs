use soroban_sdk::{symbol_short, Address, Env, Symbol, I256};

use crate::{errors::ContractError, ledger::Position, policy::PolicyConfig, rewards::PoolState};

// ── Storage key constants ────────────────────────────────────────────────────

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
pub const INITIALIZED: Symbol = symbol_short!("INIT");
pub const VERSION: Symbol = symbol_short!("VERSION");
pub const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
pub const REWARD_MINTER: Symbol = symbol_short!("MINTER");
pub const POLICY: Symbol = symbol_short!("POLICY");
pub const POOL: Symbol = symbol_short!("POOL");

// Per-account persistent storage uses tuple keys: (prefix, account)
pub const POSITION: Symbol = symbol_short!("POS");

// Version 1 layout: pool scalars in instance storage, one persistent entry
// per account field.
pub const LEGACY_TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
pub const LEGACY_REWARD_RATE: Symbol = symbol_short!("RWD_RATE");
pub const LEGACY_REWARD_PER_SHARE: Symbol = symbol_short!("RPT");
pub const LEGACY_LAST_UPDATE: Symbol = symbol_short!("LAST_UPD");
pub const LEGACY_LOCK_PERIOD: Symbol = symbol_short!("LOCK_PER");
pub const LEGACY_USER_STAKE: Symbol = symbol_short!("STK");
pub const LEGACY_USER_RPT_PAID: Symbol = symbol_short!("RPT_PAID");
pub const LEGACY_USER_EARNED: Symbol = symbol_short!("ERND");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn stake_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&STAKE_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn load_policy(env: &Env) -> Result<PolicyConfig, ContractError> {
    env.storage()
        .instance()
        .get(&POLICY)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_policy(env: &Env, policy: &PolicyConfig) {
    env.storage().instance().set(&POLICY, policy);
    extend_instance(env);
}

pub fn load_pool(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_pool(env: &Env, pool: &PoolState) {
    env.storage().instance().set(&POOL, pool);
    extend_instance(env);
}

/// Loads the position of `account`, assembling it from version 1 entries
/// when the account has not been touched since the layout migration.
pub fn load_position(env: &Env, account: &Address) -> Position {
    let key = (POSITION, account.clone());
    if let Some(position) = env.storage().persistent().get(&key) {
        return position;
    }

    let persistent = env.storage().persistent();
    Position {
        amount: persistent
            .get(&(LEGACY_USER_STAKE, account.clone()))
            .unwrap_or(0),
        reward_per_share_paid: I256::from_i128(
            env,
            persistent
                .get(&(LEGACY_USER_RPT_PAID, account.clone()))
                .unwrap_or(0),
        ),
        rewards: persistent
            .get(&(LEGACY_USER_EARNED, account.clone()))
            .unwrap_or(0),
        ..Position::new(env)
    }
}

pub fn save_position(env: &Env, account: &Address, position: &Position) {
    let key = (POSITION, account.clone());
    let persistent = env.storage().persistent();
    persistent.set(&key, position);
    persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    persistent.remove(&(LEGACY_USER_STAKE, account.clone()));
    persistent.remove(&(LEGACY_USER_RPT_PAID, account.clone()));
    persistent.remove(&(LEGACY_USER_EARNED, account.clone()));
}
