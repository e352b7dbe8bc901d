extern crate std;

use common::{AuthorizationIntent, SCOPE_DEPOSIT, SCOPE_WITHDRAW};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, BytesN, Env, String,
};

use crate::{
    storage, test_support::TestSigner, ContractError, RewardModel, StakeLockContract,
    StakeLockContractClient,
};

const START: u64 = 5_000;

struct Legacy {
    env: Env,
    client: StakeLockContractClient<'static>,
    contract_id: Address,
    admin: Address,
    staker: Address,
    authority: TestSigner,
}

/// A contract whose storage is still in the version 1 layout, holding one
/// staker with 100 tokens and 5 settled rewards. Version 1 kept no policy
/// record, only a bare lock period.
fn legacy() -> Legacy {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakeLockContract, ());
    let client = StakeLockContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let staker = Address::generate(&env);
    let authority = TestSigner::new(7);

    StellarAssetClient::new(&env, &stake_token).mint(&contract_id, &100);

    env.as_contract(&contract_id, || {
        let instance = env.storage().instance();
        instance.set(&storage::INITIALIZED, &true);
        instance.set(&storage::ADMIN, &admin);
        instance.set(&storage::STAKE_TOKEN, &stake_token);
        instance.set(&storage::LEGACY_LOCK_PERIOD, &0u64);
        instance.set(&storage::LEGACY_TOTAL_STAKED, &100i128);
        instance.set(&storage::LEGACY_REWARD_RATE, &1i128);
        instance.set(&storage::LEGACY_REWARD_PER_SHARE, &0i128);
        instance.set(&storage::LEGACY_LAST_UPDATE, &START);

        let persistent = env.storage().persistent();
        persistent.set(&(storage::LEGACY_USER_STAKE, staker.clone()), &100i128);
        persistent.set(&(storage::LEGACY_USER_RPT_PAID, staker.clone()), &0i128);
        persistent.set(&(storage::LEGACY_USER_EARNED, staker.clone()), &5i128);
    });

    Legacy {
        env,
        client,
        contract_id,
        admin,
        staker,
        authority,
    }
}

fn withdraw_all(l: &Legacy) -> Result<(), ContractError> {
    let param = BytesN::from_array(&l.env, &[1u8; 32]);
    let timestamp = l.env.ledger().timestamp();
    let intent = AuthorizationIntent {
        source: l.contract_id.clone(),
        destination: l.staker.clone(),
        amount: 100,
        scope: String::from_str(&l.env, SCOPE_WITHDRAW),
        param: param.clone(),
        timestamp,
    };
    let signature = l.authority.sign(&l.env, &intent);

    match l.client.try_withdraw(
        &l.staker,
        &100,
        &param,
        &timestamp,
        &l.authority.identity(&l.env),
        &signature,
    ) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(e)) => Err(e),
        _ => unreachable!("Unexpected host failure"),
    }
}

#[test]
fn test_unmigrated_state_is_refused() {
    let l = legacy();

    assert_eq!(l.client.version(), 1);
    assert_eq!(withdraw_all(&l), Err(ContractError::MigrationRequired));
}

#[test]
fn test_only_admin_migrates() {
    let l = legacy();

    match l
        .client
        .try_migrate(&Address::generate(&l.env), &l.authority.identity(&l.env))
    {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(l.client.version(), 1);
}

#[test]
fn test_migration_carries_pool_and_positions() {
    let l = legacy();

    assert_eq!(l.client.migrate(&l.admin, &l.authority.identity(&l.env)), 2);
    assert_eq!(l.client.version(), 2);

    let pool = l.client.get_pool();
    assert_eq!(pool.total_staked, 100);
    assert_eq!(pool.reward_rate, 1);
    assert_eq!(pool.last_update, START);
    assert_eq!(pool.period_finish, None);

    l.env.as_contract(&l.contract_id, || {
        let instance = l.env.storage().instance();
        assert!(!instance.has(&storage::LEGACY_TOTAL_STAKED));
        assert!(!instance.has(&storage::LEGACY_REWARD_PER_SHARE));
        assert!(!instance.has(&storage::LEGACY_LOCK_PERIOD));
    });

    // Accounts are read through the old entries until first written.
    assert_eq!(l.client.balance_of(&l.staker), 100);
    l.env.ledger().set_timestamp(START + 10);
    assert_eq!(l.client.earned(&l.staker), 15);

    withdraw_all(&l).unwrap();
    assert_eq!(l.client.balance_of(&l.staker), 0);
    assert_eq!(l.client.earned(&l.staker), 15);

    l.env.as_contract(&l.contract_id, || {
        let persistent = l.env.storage().persistent();
        assert!(!persistent.has(&(storage::LEGACY_USER_STAKE, l.staker.clone())));
        assert!(!persistent.has(&(storage::LEGACY_USER_EARNED, l.staker.clone())));
    });
}

#[test]
fn test_migrate_twice_fails() {
    let l = legacy();
    let signer = l.authority.identity(&l.env);
    l.client.migrate(&l.admin, &signer);

    match l.client.try_migrate(&l.admin, &signer) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyMigrated),
        _ => unreachable!("Expected AlreadyMigrated error"),
    }
}

#[test]
fn test_migrate_before_initialize_fails() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(StakeLockContract, ());
    let client = StakeLockContractClient::new(&env, &contract_id);

    match client.try_migrate(&Address::generate(&env), &TestSigner::new(7).identity(&env)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotInitialized),
        _ => unreachable!("Expected NotInitialized error"),
    }
}

#[test]
fn test_migration_builds_policy_from_lock_period() {
    let l = legacy();
    l.env.as_contract(&l.contract_id, || {
        let instance = l.env.storage().instance();
        assert!(!instance.has(&storage::POLICY));
        instance.set(&storage::LEGACY_LOCK_PERIOD, &3_600u64);
    });

    l.client.migrate(&l.admin, &l.authority.identity(&l.env));

    let policy = l.client.get_policy();
    assert!(policy.enabled);
    assert_eq!(policy.lock_duration, 3_600);
    assert_eq!(policy.signer, l.authority.identity(&l.env));
    assert_eq!(policy.reward_model, RewardModel::FlatRate);
    assert_eq!(policy.min_stake, 0);
    assert_eq!(policy.min_unlock, 0);

    // The migrated lock period governs new deposits.
    StellarAssetClient::new(&l.env, &l.client.get_stake_token()).mint(&l.staker, &50);
    let param = BytesN::from_array(&l.env, &[2u8; 32]);
    let timestamp = l.env.ledger().timestamp();
    let intent = AuthorizationIntent {
        source: l.contract_id.clone(),
        destination: l.staker.clone(),
        amount: 50,
        scope: String::from_str(&l.env, SCOPE_DEPOSIT),
        param: param.clone(),
        timestamp,
    };
    let signature = l.authority.sign(&l.env, &intent);
    l.client.deposit(
        &l.staker,
        &50,
        &param,
        &timestamp,
        &l.authority.identity(&l.env),
        &signature,
    );

    assert_eq!(l.client.get_position(&l.staker).unlock_at, START + 3_600);
    assert_eq!(withdraw_all(&l), Err(ContractError::InsufficientAvailable));
}
