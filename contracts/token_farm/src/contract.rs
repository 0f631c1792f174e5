use farm::utils::AdminChange;
use soroban_sdk::{contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env};

use crate::{
    error::ContractError,
    msg::{ConfigResponse, ParticipantsResponse},
    rewards::distribute_all,
    storage::{
        get_config, get_participant, get_pending_admin, remove_pending_admin, save_config,
        save_participant, save_pending_admin,
        utils::{self, get_admin, get_participants, get_total_staked_counter},
        Config, Participant,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Token Farm LP token staking with per block DappToken rewards"
);

#[contract]
pub struct TokenFarm;

pub trait TokenFarmTrait {
    fn deposit(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn distribute_rewards_all(env: Env, sender: Address) -> Result<(), ContractError>;

    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn withdraw(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> ConfigResponse;

    fn query_admin(env: Env) -> Address;

    fn query_staking_balance(env: Env, address: Address) -> i128;

    fn query_is_staking(env: Env, address: Address) -> bool;

    fn query_pending_rewards(env: Env, address: Address) -> i128;

    fn query_participant(env: Env, address: Address) -> Participant;

    fn query_participants(env: Env) -> ParticipantsResponse;

    fn query_total_staked(env: Env) -> i128;
}

#[contractimpl]
impl TokenFarmTrait for TokenFarm {
    fn deposit(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        if amount <= 0 {
            log!(
                &env,
                "Token Farm: Deposit: Trying to deposit {} which is not a positive amount",
                amount
            );
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env);

        let mut participant = match get_participant(&env, &sender) {
            Some(participant) => participant,
            None => {
                utils::add_participant(&env, &sender, config.max_participants)?;
                Participant::default()
            }
        };

        let farm_address = env.current_contract_address();
        let lp_token_client = token::Client::new(&env, &config.lp_token);
        if !matches!(
            lp_token_client.try_transfer_from(&farm_address, &sender, &farm_address, &amount),
            Ok(Ok(()))
        ) {
            log!(
                &env,
                "Token Farm: Deposit: Transfer of {} LP tokens was rejected, check balance and allowance",
                amount
            );
            return Err(ContractError::TransferFailed);
        }

        // a fresh stake starts earning from the current block
        if !participant.is_staking {
            participant.checkpoint_block = env.ledger().sequence();
        }
        participant.staking_balance = participant
            .staking_balance
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        participant.is_staking = true;

        save_participant(&env, &sender, &participant);
        utils::increase_total_staked(&env, amount)?;

        env.events().publish(("deposit", "user"), &sender);
        env.events().publish(("deposit", "token"), &config.lp_token);
        env.events().publish(("deposit", "amount"), amount);

        Ok(())
    }

    fn distribute_rewards_all(env: Env, sender: Address) -> Result<(), ContractError> {
        sender.require_auth();

        if sender != get_admin(&env) {
            log!(
                &env,
                "Token Farm: Distribute rewards all: Only the admin can distribute rewards"
            );
            return Err(ContractError::Unauthorized);
        }

        let accrued = distribute_all(&env)?;

        env.events().publish(
            ("distribute_rewards_all", "block"),
            env.ledger().sequence(),
        );
        env.events()
            .publish(("distribute_rewards_all", "accrued"), accrued);

        Ok(())
    }

    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let mut participant = get_participant(&env, &sender).unwrap_or_default();
        let reward_amount = participant.pending_rewards;
        if reward_amount == 0 {
            log!(&env, "Token Farm: Claim rewards: No pending rewards to claim");
            return Err(ContractError::NothingToClaim);
        }

        let config = get_config(&env);
        let dapp_token_client = token::StellarAssetClient::new(&env, &config.dapp_token);
        if !matches!(
            dapp_token_client.try_mint(&sender, &reward_amount),
            Ok(Ok(()))
        ) {
            log!(
                &env,
                "Token Farm: Claim rewards: Minting {} reward tokens was rejected, is the farm the token admin?",
                reward_amount
            );
            return Err(ContractError::TransferFailed);
        }

        participant.pending_rewards = 0;
        save_participant(&env, &sender, &participant);

        env.events().publish(("claim_rewards", "user"), &sender);
        env.events()
            .publish(("claim_rewards", "token"), &config.dapp_token);
        env.events()
            .publish(("claim_rewards", "amount"), reward_amount);

        Ok(reward_amount)
    }

    fn withdraw(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let mut participant = get_participant(&env, &sender).unwrap_or_default();
        let stake_amount = participant.staking_balance;
        if stake_amount == 0 {
            log!(&env, "Token Farm: Withdraw: Nothing staked");
            return Err(ContractError::NothingStaked);
        }

        let config = get_config(&env);
        let lp_token_client = token::Client::new(&env, &config.lp_token);
        if !matches!(
            lp_token_client.try_transfer(&env.current_contract_address(), &sender, &stake_amount),
            Ok(Ok(()))
        ) {
            log!(
                &env,
                "Token Farm: Withdraw: Transfer of {} LP tokens was rejected",
                stake_amount
            );
            return Err(ContractError::TransferFailed);
        }

        // pending rewards stay claimable after the stake is gone
        participant.staking_balance = 0;
        participant.is_staking = false;

        save_participant(&env, &sender, &participant);
        utils::decrease_total_staked(&env, stake_amount)?;

        env.events().publish(("withdraw", "user"), &sender);
        env.events().publish(("withdraw", "token"), &config.lp_token);
        env.events().publish(("withdraw", "amount"), stake_amount);

        Ok(stake_amount)
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Token Farm: Propose admin: Trying to set the same admin");
            return Err(ContractError::SameAdmin);
        }

        save_pending_admin(
            &env,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events().publish(
            ("propose_admin", "new_admin"),
            (new_admin.clone(), time_limit),
        );

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if get_pending_admin(&env).is_none() {
            log!(&env, "Token Farm: Revoke admin change: No admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }

        remove_pending_admin(&env);

        env.events()
            .publish(("revoke_admin_change", "admin"), current_admin);

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let admin_change = get_pending_admin(&env).ok_or_else(|| {
            log!(&env, "Token Farm: Accept admin: No admin change in place");
            ContractError::NoAdminChangeInPlace
        })?;

        let pending_admin = admin_change.new_admin.clone();
        pending_admin.require_auth();

        if admin_change.is_expired(&env) {
            log!(
                &env,
                "Token Farm: Accept admin: Admin change expired at {}",
                admin_change.time_limit
            );
            return Err(ContractError::AdminChangeExpired);
        }

        remove_pending_admin(&env);
        utils::save_admin(&env, &pending_admin);

        env.events()
            .publish(("accept_admin", "new_admin"), pending_admin.clone());

        Ok(pending_admin)
    }

    // QUERIES

    fn query_config(env: Env) -> ConfigResponse {
        ConfigResponse {
            config: get_config(&env),
        }
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }

    fn query_staking_balance(env: Env, address: Address) -> i128 {
        Self::query_participant(env, address).staking_balance
    }

    fn query_is_staking(env: Env, address: Address) -> bool {
        Self::query_participant(env, address).is_staking
    }

    fn query_pending_rewards(env: Env, address: Address) -> i128 {
        Self::query_participant(env, address).pending_rewards
    }

    fn query_participant(env: Env, address: Address) -> Participant {
        get_participant(&env, &address).unwrap_or_default()
    }

    fn query_participants(env: Env) -> ParticipantsResponse {
        ParticipantsResponse {
            participants: get_participants(&env),
        }
    }

    fn query_total_staked(env: Env) -> i128 {
        get_total_staked_counter(&env)
    }
}

#[contractimpl]
impl TokenFarm {
    /// `dapp_token` must have the farm as its admin before the first claim,
    /// rewards are minted and not paid out of a pre-funded balance.
    pub fn __constructor(
        env: Env,
        admin: Address,
        dapp_token: Address,
        lp_token: Address,
        max_participants: u32,
    ) {
        if max_participants == 0 {
            log!(
                &env,
                "Token Farm: Initialize: max_participants must be bigger than 0"
            );
            panic_with_error!(&env, ContractError::InvalidMaxParticipants);
        }

        utils::save_admin(&env, &admin);

        let config = Config {
            dapp_token,
            lp_token,
            max_participants,
        };
        save_config(&env, &config);
        utils::init_total_staked(&env);

        env.events().publish(
            ("initialize", "Token Farm LP staking contract"),
            &config.lp_token,
        );
    }
}
