use soroban_sdk::Env;

use crate::{
    error::ContractError,
    storage::{get_participant, save_participant, utils::get_participants, Participant},
};

/// One reward token unit is accrued per this many staked units per block.
pub const STAKE_UNITS_PER_REWARD_UNIT: i128 = 100;

/// Reward earned by `staking_balance` over `elapsed_blocks`, truncated.
pub fn calculate_accrual(staking_balance: i128, elapsed_blocks: u32) -> Option<i128> {
    staking_balance
        .checked_mul(elapsed_blocks as i128)?
        .checked_div(STAKE_UNITS_PER_REWARD_UNIT)
}

/// Moves the checkpoint of a staking participant to `current_block` and adds the reward
/// earned in between to its pending rewards. Returns the amount accrued.
pub fn settle(participant: &mut Participant, current_block: u32) -> Result<i128, ContractError> {
    if !participant.is_staking {
        return Ok(0);
    }

    let elapsed_blocks = current_block.saturating_sub(participant.checkpoint_block);
    let accrued = calculate_accrual(participant.staking_balance, elapsed_blocks)
        .ok_or(ContractError::ContractMathError)?;

    participant.pending_rewards = participant
        .pending_rewards
        .checked_add(accrued)
        .ok_or(ContractError::ContractMathError)?;
    participant.checkpoint_block = current_block;

    Ok(accrued)
}

/// Settles every staking participant in order of first deposit. Returns the total accrued.
pub fn distribute_all(env: &Env) -> Result<i128, ContractError> {
    let current_block = env.ledger().sequence();
    let mut total_accrued = 0i128;

    for address in get_participants(env).iter() {
        let Some(mut participant) = get_participant(env, &address) else {
            continue;
        };
        if !participant.is_staking {
            continue;
        }

        let accrued = settle(&mut participant, current_block)?;
        save_participant(env, &address, &participant);

        total_accrued = total_accrued
            .checked_add(accrued)
            .ok_or(ContractError::ContractMathError)?;
    }

    Ok(total_accrued)
}
