extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::Address as _,
    Address, IntoVal,
};

use crate::{
    test_support::{Fixture, TestSigner, TEN},
    ContractError, RewardModel,
};

#[test]
fn test_non_admin_cannot_change_policy() {
    let f = Fixture::flat(0);
    let outsider = Address::generate(&f.env);

    let results = [
        f.client.try_set_enabled(&outsider, &false),
        f.client.try_set_min_stake(&outsider, &1),
        f.client.try_set_min_unlock(&outsider, &1),
        f.client.try_set_lock_duration(&outsider, &1),
        f.client
            .try_set_signer(&outsider, &TestSigner::new(9).identity(&f.env)),
        f.client.try_set_reward_rate(&outsider, &1),
        f.client
            .try_set_reward_model(&outsider, &RewardModel::FundedDuration),
        f.client
            .try_set_reward_minter(&outsider, &Address::generate(&f.env)),
    ];

    for result in results {
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
            _ => unreachable!("Expected Unauthorized error"),
        }
    }

    let policy = f.client.get_policy();
    assert!(policy.enabled);
    assert_eq!(policy.min_stake, 0);
}

#[test]
fn test_admin_setters_update_policy() {
    let f = Fixture::flat(0);
    let next_signer = TestSigner::new(11).identity(&f.env);

    f.client.set_min_stake(&f.admin, &3);
    f.client.set_min_unlock(&f.admin, &2);
    f.client.set_lock_duration(&f.admin, &86_400);
    f.client.set_signer(&f.admin, &next_signer);

    let policy = f.client.get_policy();
    assert_eq!(policy.min_stake, 3);
    assert_eq!(policy.min_unlock, 2);
    assert_eq!(policy.lock_duration, 86_400);
    assert_eq!(policy.signer, next_signer);
}

#[test]
fn test_signer_change_emits_event() {
    let f = Fixture::flat(0);
    let next_signer = TestSigner::new(11).identity(&f.env);

    f.client.set_signer(&f.admin, &next_signer);

    let events = crate::test_support::all_events(&f.env);
    let event = events.last().unwrap();
    assert_eq!(event.1, (symbol_short!("SIGNER"),).into_val(&f.env));
}

#[test]
fn test_rate_setter_requires_flat_model() {
    let f = Fixture::new(RewardModel::FundedDuration);

    match f.client.try_set_reward_rate(&f.admin, &TEN) {
        Err(Ok(e)) => assert_eq!(e, ContractError::WrongRewardModel),
        _ => unreachable!("Expected WrongRewardModel error"),
    }
}

#[test]
fn test_funded_setters_require_funded_model() {
    let f = Fixture::flat(TEN);

    match f.client.try_notify_reward_amount(&f.admin, &TEN) {
        Err(Ok(e)) => assert_eq!(e, ContractError::WrongRewardModel),
        _ => unreachable!("Expected WrongRewardModel error"),
    }
    match f.client.try_set_rewards_duration(&f.admin, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::WrongRewardModel),
        _ => unreachable!("Expected WrongRewardModel error"),
    }
}

#[test]
fn test_negative_rate_rejected() {
    let f = Fixture::flat(0);

    match f.client.try_set_reward_rate(&f.admin, &-1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidConfig),
        _ => unreachable!("Expected InvalidConfig error"),
    }
}

// ── Admin transfer ──────────────────────────────────────────────────────────

#[test]
fn test_two_step_admin_transfer() {
    let f = Fixture::flat(0);
    let new_admin = Address::generate(&f.env);

    f.client.propose_admin(&f.admin, &new_admin);
    assert_eq!(f.client.get_pending_admin(), Some(new_admin.clone()));
    assert_eq!(f.client.get_admin(), f.admin);

    f.client.accept_admin(&new_admin);
    assert_eq!(f.client.get_admin(), new_admin);
    assert_eq!(f.client.get_pending_admin(), None);

    // Old admin loses its rights.
    match f.client.try_set_enabled(&f.admin, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    f.client.set_enabled(&new_admin, &false);
}

#[test]
fn test_only_proposed_admin_can_accept() {
    let f = Fixture::flat(0);
    let new_admin = Address::generate(&f.env);
    let outsider = Address::generate(&f.env);

    match f.client.try_accept_admin(&outsider) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    f.client.propose_admin(&f.admin, &new_admin);
    match f.client.try_accept_admin(&outsider) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_cancel_admin_transfer() {
    let f = Fixture::flat(0);
    let new_admin = Address::generate(&f.env);

    f.client.propose_admin(&f.admin, &new_admin);
    f.client.cancel_admin_transfer(&f.admin);

    let events = crate::test_support::all_events(&f.env);
    let event = events.last().unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("ADM_CNCL"), f.admin.clone()).into_val(&f.env)
    );

    assert_eq!(f.client.get_pending_admin(), None);
    match f.client.try_accept_admin(&new_admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_non_admin_cannot_propose() {
    let f = Fixture::flat(0);
    let outsider = Address::generate(&f.env);

    match f.client.try_propose_admin(&outsider, &outsider) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
