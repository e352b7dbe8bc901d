#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

use crate::policy::RewardModel;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub signer: BytesN<20>,
    pub reward_model: RewardModel,
    pub timestamp: u64,
}

/// Fired when an authorized deposit is applied.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRecordedEvent {
    pub account: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub unlock_at: u64,
    pub timestamp: u64,
}

/// Fired when an authorized withdrawal is applied.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawRecordedEvent {
    pub account: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when the reward minter settles an account.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsSettledEvent {
    pub minter: Address,
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a funded-duration budget is notified.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAddedEvent {
    pub reward: i128,
    pub reward_rate: i128,
    pub period_finish: u64,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    signer: BytesN<20>,
    reward_model: RewardModel,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            signer,
            reward_model,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit_recorded(
    env: &Env,
    account: Address,
    amount: i128,
    new_total_staked: i128,
    unlock_at: u64,
) {
    env.events().publish(
        (symbol_short!("DEPOSITED"), account.clone()),
        DepositRecordedEvent {
            account,
            amount,
            new_total_staked,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_recorded(env: &Env, account: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), account.clone()),
        WithdrawRecordedEvent {
            account,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_settled(env: &Env, minter: Address, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SETTLED"), account.clone()),
        RewardsSettledEvent {
            minter,
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_added(env: &Env, reward: i128, reward_rate: i128, period_finish: u64) {
    env.events().publish(
        (symbol_short!("RWD_ADD"),),
        RewardAddedEvent {
            reward,
            reward_rate,
            period_finish,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        (new_rate, env.ledger().timestamp()),
    );
}

pub fn publish_rewards_duration_set(env: &Env, duration: u64) {
    env.events().publish(
        (symbol_short!("RWD_DUR"),),
        (duration, env.ledger().timestamp()),
    );
}

pub fn publish_reward_model_set(env: &Env, model: RewardModel) {
    env.events().publish(
        (symbol_short!("RWD_MODEL"),),
        (model, env.ledger().timestamp()),
    );
}

pub fn publish_status_set(env: &Env, enabled: bool) {
    env.events().publish(
        (symbol_short!("STATUS"),),
        (enabled, env.ledger().timestamp()),
    );
}

pub fn publish_min_stake_set(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("MIN_STK"),),
        (amount, env.ledger().timestamp()),
    );
}

pub fn publish_min_unlock_set(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("MIN_UNLK"),),
        (amount, env.ledger().timestamp()),
    );
}

pub fn publish_lock_duration_set(env: &Env, duration: u64) {
    env.events().publish(
        (symbol_short!("LOCK_SET"),),
        (duration, env.ledger().timestamp()),
    );
}

pub fn publish_signer_changed(env: &Env, signer: BytesN<20>) {
    env.events().publish(
        (symbol_short!("SIGNER"),),
        (signer, env.ledger().timestamp()),
    );
}

pub fn publish_reward_minter_set(env: &Env, minter: Address) {
    env.events().publish(
        (symbol_short!("MINTER"),),
        (minter, env.ledger().timestamp()),
    );
}

pub fn publish_migrated(env: &Env, from_version: u32, to_version: u32) {
    env.events().publish(
        (symbol_short!("MIGRATED"),),
        (from_version, to_version, env.ledger().timestamp()),
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin),
        (cancelled_proposed, env.ledger().timestamp()),
    );
}
