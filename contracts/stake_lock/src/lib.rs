#![no_std]

pub mod errors;
pub mod events;
pub mod ledger;
pub mod migration;
pub mod policy;
pub mod rewards;
mod storage;

use common::{
    authorization::{self, AuthorizationIntent},
    replay, SCOPE_DEPOSIT, SCOPE_WITHDRAW,
};
use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env, String};

pub use errors::{ContractError, ErrorCategory};
pub use ledger::Position;
pub use policy::{PolicyConfig, RewardModel};
pub use rewards::{PoolState, SCALE};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakeLockContract;

#[contractimpl]
impl StakeLockContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`  – SAC address of the token users deposit.
    /// * `signer`       – identity whose signatures authorize deposits and
    ///                    withdrawals.
    /// * `reward_model` – flat per-second rate or funded budget per period.
    ///
    /// The ledger starts disabled; the admin enables it once configured.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        signer: BytesN<20>,
        reward_model: RewardModel,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        let now = env.ledger().timestamp();

        env.storage().instance().set(&storage::ADMIN, &admin);
        env.storage().instance().set(&storage::INITIALIZED, &true);
        env.storage()
            .instance()
            .set(&storage::STAKE_TOKEN, &stake_token);
        migration::set_current_version(&env);
        storage::save_policy(&env, &PolicyConfig::new(signer.clone(), reward_model));
        storage::save_pool(&env, &PoolState::new(&env, reward_model, now));

        events::publish_initialized(&env, admin, stake_token, signer, reward_model);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    /// Layout version of the stored state.
    pub fn version(env: Env) -> u32 {
        migration::stored_version(&env)
    }

    /// Upgrade stored state to the current layout. Admin only.
    ///
    /// `signer` becomes the designated signer when the stored layout predates
    /// signature-authorized deposits; it is ignored otherwise.
    pub fn migrate(env: Env, caller: Address, signer: BytesN<20>) -> Result<u32, ContractError> {
        if !storage::is_initialized(&env) {
            return Err(ContractError::NotInitialized);
        }
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let from = migration::stored_version(&env);
        let to = migration::migrate(&env, signer)?;

        events::publish_migrated(&env, from, to);

        Ok(to)
    }

    // ── Deposits & withdrawals ──────────────────────────────────────────────

    /// Deposit `amount` stake tokens for `account`.
    ///
    /// The call must carry a signature by the designated signer over
    /// `(this contract, account, amount, "stake_lock:deposit", param, timestamp)`.
    /// `timestamp` starts the deposit's time-lock.
    pub fn deposit(
        env: Env,
        account: Address,
        amount: i128,
        param: BytesN<32>,
        timestamp: u64,
        signer: BytesN<20>,
        signature: BytesN<65>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        let now = env.ledger().timestamp();
        let policy = storage::load_policy(&env)?;
        let mut pool = storage::load_pool(&env)?;
        let mut position = storage::load_position(&env, &account);

        // 1. Accrue everything owed on the pre-deposit balance.
        rewards::settle(&env, &mut pool, &mut position, now)?;

        // 2. Check and burn the authorization.
        let intent = Self::intent(&env, &account, amount, SCOPE_DEPOSIT, param, timestamp);
        Self::consume_authorization(&env, &policy, &intent, &signer, &signature)?;

        // 3. Apply the balance change.
        ledger::deposit(&policy, &mut pool, &mut position, amount, timestamp)?;

        // 4. Pull tokens from the account into the contract.
        token::Client::new(&env, &storage::stake_token(&env)?).transfer(
            &account,
            &env.current_contract_address(),
            &amount,
        );

        storage::save_pool(&env, &pool);
        storage::save_position(&env, &account, &position);

        events::publish_deposit_recorded(
            &env,
            account,
            amount,
            pool.total_staked,
            position.unlock_at,
        );

        Ok(())
    }

    /// Withdraw `amount` unlocked stake tokens back to `account`.
    ///
    /// Authorized like [`Self::deposit`] under the `"stake_lock:withdraw"` scope.
    pub fn withdraw(
        env: Env,
        account: Address,
        amount: i128,
        param: BytesN<32>,
        timestamp: u64,
        signer: BytesN<20>,
        signature: BytesN<65>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        let now = env.ledger().timestamp();
        let policy = storage::load_policy(&env)?;
        let mut pool = storage::load_pool(&env)?;
        let mut position = storage::load_position(&env, &account);

        rewards::settle(&env, &mut pool, &mut position, now)?;

        let intent = Self::intent(&env, &account, amount, SCOPE_WITHDRAW, param, timestamp);
        Self::consume_authorization(&env, &policy, &intent, &signer, &signature)?;

        ledger::withdraw(&policy, &mut pool, &mut position, amount, now)?;

        token::Client::new(&env, &storage::stake_token(&env)?).transfer(
            &env.current_contract_address(),
            &account,
            &amount,
        );

        storage::save_pool(&env, &pool);
        storage::save_position(&env, &account, &position);

        events::publish_withdraw_recorded(&env, account, amount, pool.total_staked);

        Ok(())
    }

    // ── Reward capability ───────────────────────────────────────────────────

    /// Settle `account` and hand its accrued rewards to the reward minter.
    ///
    /// Returns the amount the minter must issue; the account's accrued
    /// balance is zeroed.
    pub fn settle_rewards(
        env: Env,
        minter: Address,
        account: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        minter.require_auth();

        let registered: Address = env
            .storage()
            .instance()
            .get(&storage::REWARD_MINTER)
            .ok_or(ContractError::Unauthorized)?;
        if registered != minter {
            return Err(ContractError::Unauthorized);
        }

        let mut pool = storage::load_pool(&env)?;
        let mut position = storage::load_position(&env, &account);
        rewards::settle(&env, &mut pool, &mut position, env.ledger().timestamp())?;

        let amount = position.rewards;
        position.rewards = 0;

        storage::save_pool(&env, &pool);
        storage::save_position(&env, &account, &position);

        events::publish_rewards_settled(&env, minter, account, amount);

        Ok(amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Real-time rewards of `account` (settled plus pending) without
    /// mutating state.
    pub fn earned(env: Env, account: Address) -> Result<i128, ContractError> {
        let pool = storage::load_pool(&env)?;
        let position = storage::load_position(&env, &account);
        let rps = rewards::reward_per_share(&env, &pool, env.ledger().timestamp());
        rewards::earned(&env, &position, &rps)
    }

    /// Part of the balance of `account` whose time-lock has elapsed.
    pub fn available_balance(env: Env, account: Address) -> i128 {
        let position = storage::load_position(&env, &account);
        ledger::available_balance(&position, env.ledger().timestamp())
    }

    pub fn balance_of(env: Env, account: Address) -> i128 {
        storage::load_position(&env, &account).amount
    }

    pub fn get_position(env: Env, account: Address) -> Position {
        storage::load_position(&env, &account)
    }

    pub fn total_staked(env: Env) -> Result<i128, ContractError> {
        Ok(storage::load_pool(&env)?.total_staked)
    }

    pub fn get_pool(env: Env) -> Result<PoolState, ContractError> {
        storage::load_pool(&env)
    }

    pub fn get_policy(env: Env) -> Result<PolicyConfig, ContractError> {
        storage::load_policy(&env)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        storage::stake_token(&env)
    }

    pub fn get_reward_minter(env: Env) -> Option<Address> {
        env.storage().instance().get(&storage::REWARD_MINTER)
    }

    /// Digest the authority signs for `intent`.
    pub fn get_message_hash(env: Env, intent: AuthorizationIntent) -> BytesN<32> {
        authorization::message_hash(&env, &intent)
    }

    /// Whether `signature` over `intent` was produced by `signer`.
    pub fn verify(
        env: Env,
        intent: AuthorizationIntent,
        signer: BytesN<20>,
        signature: BytesN<65>,
    ) -> bool {
        authorization::verify(&env, &intent, &signer, &signature)
    }

    pub fn is_consumed(env: Env, digest: BytesN<32>) -> bool {
        replay::is_consumed(&env, &digest)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::admin(&env)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage()
            .instance()
            .set(&storage::PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&storage::PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = storage::admin(&env)?;

        env.storage().instance().set(&storage::ADMIN, &new_admin);
        env.storage().instance().remove(&storage::PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&storage::PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&storage::PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&storage::PENDING_ADMIN)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Enable or disable deposits and withdrawals.
    pub fn set_enabled(env: Env, caller: Address, enabled: bool) -> Result<(), ContractError> {
        let mut policy = Self::admin_policy(&env, &caller)?;
        policy.enabled = enabled;
        storage::save_policy(&env, &policy);

        events::publish_status_set(&env, enabled);
        Ok(())
    }

    pub fn set_min_stake(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        let mut policy = Self::admin_policy(&env, &caller)?;
        policy.set_min_stake(amount)?;
        storage::save_policy(&env, &policy);

        events::publish_min_stake_set(&env, amount);
        Ok(())
    }

    pub fn set_min_unlock(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        let mut policy = Self::admin_policy(&env, &caller)?;
        policy.set_min_unlock(amount)?;
        storage::save_policy(&env, &policy);

        events::publish_min_unlock_set(&env, amount);
        Ok(())
    }

    /// Lock length for *future* deposits; existing locks keep their expiry.
    pub fn set_lock_duration(env: Env, caller: Address, seconds: u64) -> Result<(), ContractError> {
        let mut policy = Self::admin_policy(&env, &caller)?;
        policy.lock_duration = seconds;
        storage::save_policy(&env, &policy);

        events::publish_lock_duration_set(&env, seconds);
        Ok(())
    }

    /// Replace the designated signer. Authorizations signed by the previous
    /// signer stop being accepted immediately.
    pub fn set_signer(env: Env, caller: Address, signer: BytesN<20>) -> Result<(), ContractError> {
        let mut policy = Self::admin_policy(&env, &caller)?;
        policy.signer = signer.clone();
        storage::save_policy(&env, &policy);

        events::publish_signer_changed(&env, signer);
        Ok(())
    }

    /// Switch reward model. Accrual up to now is kept; emission restarts at
    /// zero under the new model until configured.
    pub fn set_reward_model(
        env: Env,
        caller: Address,
        model: RewardModel,
    ) -> Result<(), ContractError> {
        let mut policy = Self::admin_policy(&env, &caller)?;
        if policy.reward_model == model {
            return Ok(());
        }
        let mut pool = storage::load_pool(&env)?;
        rewards::switch_model(&env, &mut pool, model, env.ledger().timestamp());
        policy.reward_model = model;

        storage::save_pool(&env, &pool);
        storage::save_policy(&env, &policy);

        events::publish_reward_model_set(&env, model);
        Ok(())
    }

    /// Flat-rate model: set the pool-wide emission in tokens per second.
    ///
    /// The accumulator is flushed at the old rate first, so accrual before
    /// this call is unaffected.
    pub fn set_reward_rate(env: Env, caller: Address, rate: i128) -> Result<(), ContractError> {
        let policy = Self::admin_policy(&env, &caller)?;
        policy.require_model(RewardModel::FlatRate)?;
        if rate < 0 {
            return Err(ContractError::InvalidConfig);
        }

        let mut pool = storage::load_pool(&env)?;
        rewards::set_flat_rate(&env, &mut pool, rate, env.ledger().timestamp());
        storage::save_pool(&env, &pool);

        events::publish_reward_rate_set(&env, rate);
        Ok(())
    }

    /// Funded model: length of each reward period in seconds.
    pub fn set_rewards_duration(
        env: Env,
        caller: Address,
        duration: u64,
    ) -> Result<(), ContractError> {
        let mut policy = Self::admin_policy(&env, &caller)?;
        let pool = storage::load_pool(&env)?;
        policy.set_rewards_duration(&pool, duration, env.ledger().timestamp())?;
        storage::save_policy(&env, &policy);

        events::publish_rewards_duration_set(&env, duration);
        Ok(())
    }

    /// Funded model: add `reward` to the budget and start a new period.
    pub fn notify_reward_amount(
        env: Env,
        caller: Address,
        reward: i128,
    ) -> Result<(), ContractError> {
        let policy = Self::admin_policy(&env, &caller)?;
        policy.require_model(RewardModel::FundedDuration)?;
        if reward <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut pool = storage::load_pool(&env)?;
        rewards::notify_reward_amount(
            &env,
            &mut pool,
            reward,
            policy.rewards_duration,
            env.ledger().timestamp(),
        )?;
        storage::save_pool(&env, &pool);

        events::publish_reward_added(
            &env,
            reward,
            pool.reward_rate,
            pool.period_finish.unwrap_or_default(),
        );
        Ok(())
    }

    /// Register the contract allowed to call `settle_rewards`.
    pub fn set_reward_minter(env: Env, caller: Address, minter: Address) -> Result<(), ContractError> {
        Self::admin_policy(&env, &caller)?;
        env.storage()
            .instance()
            .set(&storage::REWARD_MINTER, &minter);

        events::publish_reward_minter_set(&env, minter);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not initialized or its stored state
    /// predates the current layout.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        if migration::stored_version(env) != migration::CURRENT_VERSION {
            return Err(ContractError::MigrationRequired);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if *caller != storage::admin(env)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Common prologue of every admin setter.
    fn admin_policy(env: &Env, caller: &Address) -> Result<PolicyConfig, ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_admin(env, caller)?;
        storage::load_policy(env)
    }

    fn intent(
        env: &Env,
        account: &Address,
        amount: i128,
        scope: &str,
        param: BytesN<32>,
        timestamp: u64,
    ) -> AuthorizationIntent {
        AuthorizationIntent {
            source: env.current_contract_address(),
            destination: account.clone(),
            amount,
            scope: String::from_str(env, scope),
            param,
            timestamp,
        }
    }

    /// Designated-signer check, signature recovery, then single-use burn.
    fn consume_authorization(
        env: &Env,
        policy: &PolicyConfig,
        intent: &AuthorizationIntent,
        signer: &BytesN<20>,
        signature: &BytesN<65>,
    ) -> Result<(), ContractError> {
        let digest = authorization::authorize(env, intent, &policy.signer, signer, signature)?;
        replay::consume(env, &digest)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_admin;


#[cfg(test)]
mod test_migration;
