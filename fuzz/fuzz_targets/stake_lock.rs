#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{BytesN, Env};
use stake_lock::{
    ledger, rewards, rewards::PoolState, PolicyConfig, Position, RewardModel, SCALE,
};

const ACCOUNTS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { account: u8, amount: u64, back_dated: u16 },
    Withdraw { account: u8, amount: u64 },
    Wait { seconds: u32 },
    SetRate { rate: u32 },
    Notify { reward: u64, duration: u16 },
    SetMinimums { min_stake: u32, min_unlock: u32 },
    SetLock { seconds: u16 },
}

fuzz_target!(|input: (bool, Vec<FuzzAction>)| {
    let (funded, actions) = input;
    let env = Env::default();
    let model = if funded {
        RewardModel::FundedDuration
    } else {
        RewardModel::FlatRate
    };

    let mut policy = PolicyConfig::new(BytesN::from_array(&env, &[1u8; 20]), model);
    policy.enabled = true;
    let mut pool = PoolState::new(&env, model, 0);
    let mut positions: Vec<Position> = vec![Position::new(&env); ACCOUNTS];
    let mut now = 0u64;

    // Run the pure accounting core and check its invariants after every
    // step. Rejections are expected; panics and broken invariants are not.
    for action in actions {
        let rps_before = pool.reward_per_share.clone();
        match action {
            FuzzAction::Deposit { account, amount, back_dated } => {
                let position = &mut positions[account as usize % ACCOUNTS];
                let before = position.clone();
                if rewards::settle(&env, &mut pool, position, now).is_ok() {
                    let as_of = now.saturating_sub(back_dated as u64);
                    let _ = ledger::deposit(&policy, &mut pool, position, amount as i128, as_of);
                    assert!(position.unlock_at >= before.unlock_at);
                }
            }
            FuzzAction::Withdraw { account, amount } => {
                let position = &mut positions[account as usize % ACCOUNTS];
                if rewards::settle(&env, &mut pool, position, now).is_ok() {
                    let _ = ledger::withdraw(&policy, &mut pool, position, amount as i128, now);
                }
            }
            FuzzAction::Wait { seconds } => now += seconds as u64,
            FuzzAction::SetRate { rate } => {
                if !funded {
                    rewards::set_flat_rate(&env, &mut pool, rate as i128 * SCALE, now);
                }
            }
            FuzzAction::Notify { reward, duration } => {
                if funded {
                    let _ = rewards::notify_reward_amount(
                        &env,
                        &mut pool,
                        reward as i128,
                        duration as u64,
                        now,
                    );
                }
            }
            FuzzAction::SetMinimums { min_stake, min_unlock } => {
                let _ = policy.set_min_stake(min_stake as i128);
                let _ = policy.set_min_unlock(min_unlock as i128);
            }
            FuzzAction::SetLock { seconds } => policy.lock_duration = seconds as u64,
        }

        assert!(pool.reward_per_share >= rps_before);
        assert_eq!(
            pool.total_staked,
            positions.iter().map(|p| p.amount).sum::<i128>()
        );
        for position in positions.iter() {
            assert!(position.amount >= 0);
            assert!(position.rewards >= 0);
        }
    }
});
