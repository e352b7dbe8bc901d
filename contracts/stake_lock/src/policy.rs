use soroban_sdk::{contracttype, BytesN};

use crate::{errors::ContractError, rewards::PoolState};

/// How the pool's emission rate is determined.
///
/// - `FlatRate`       – the admin sets the pool-wide per-second rate directly.
/// - `FundedDuration` – the admin notifies a reward budget which is spread
///                      evenly over `rewards_duration` seconds.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RewardModel {
    FlatRate = 0,
    FundedDuration = 1,
}

/// Administrative parameters. Changes apply to every later operation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyConfig {
    pub enabled: bool,
    /// Floor every non-empty position must clear.
    pub min_stake: i128,
    /// Smallest partial withdrawal.
    pub min_unlock: i128,
    /// Seconds a deposit stays locked after its authorization timestamp.
    pub lock_duration: u64,
    /// Identity whose signatures authorize deposits and withdrawals.
    pub signer: BytesN<20>,
    pub reward_model: RewardModel,
    pub rewards_duration: u64,
}

impl PolicyConfig {
    /// Starts disabled with no minimums and no lock.
    pub fn new(signer: BytesN<20>, reward_model: RewardModel) -> Self {
        Self {
            enabled: false,
            min_stake: 0,
            min_unlock: 0,
            lock_duration: 0,
            signer,
            reward_model,
            rewards_duration: 0,
        }
    }

    pub fn require_model(&self, model: RewardModel) -> Result<(), ContractError> {
        if self.reward_model != model {
            return Err(ContractError::WrongRewardModel);
        }
        Ok(())
    }

    pub fn set_min_stake(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidConfig);
        }
        self.min_stake = amount;
        Ok(())
    }

    pub fn set_min_unlock(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidConfig);
        }
        self.min_unlock = amount;
        Ok(())
    }

    /// Funded model only; the running period, if any, must have ended.
    pub fn set_rewards_duration(
        &mut self,
        pool: &PoolState,
        duration: u64,
        now: u64,
    ) -> Result<(), ContractError> {
        self.require_model(RewardModel::FundedDuration)?;
        if duration == 0 {
            return Err(ContractError::InvalidConfig);
        }
        if pool.period_active(now) {
            return Err(ContractError::RewardPeriodActive);
        }
        self.rewards_duration = duration;
        Ok(())
    }
}
