use farm::{
    ttl::{PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL},
    utils::AdminChange,
};
use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol};

use crate::error::ContractError;

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("p_admin");
const CONFIG: Symbol = symbol_short!("CONFIG");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Reward asset (DappToken), minted by the farm on claim
    pub dapp_token: Address,
    /// Stake asset (LPToken), held by the farm while participants are staking
    pub lp_token: Address,
    /// Upper bound of the participant registry walked by every distribution
    pub max_participants: u32,
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .instance()
        .get(&CONFIG)
        .unwrap_or_else(|| {
            log!(env, "Token Farm: Config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        });
    utils::bump_instance(env);

    config
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    utils::bump_instance(env);
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Participant {
    /// Amount of LP tokens held by the farm on behalf of the participant
    pub staking_balance: i128,
    /// True while `staking_balance` is nonzero
    pub is_staking: bool,
    /// Ledger sequence at which rewards were last settled
    pub checkpoint_block: u32,
    /// Rewards settled by distributions and not claimed yet
    pub pending_rewards: i128,
}

pub fn get_participant(env: &Env, key: &Address) -> Option<Participant> {
    let participant = env.storage().persistent().get::<_, Participant>(key);
    if participant.is_some() {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }

    participant
}

pub fn save_participant(env: &Env, key: &Address, participant: &Participant) {
    env.storage().persistent().set(key, participant);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}

pub fn save_pending_admin(env: &Env, admin_change: &AdminChange) {
    env.storage().instance().set(&PENDING_ADMIN, admin_change);
    utils::bump_instance(env);
}

pub fn get_pending_admin(env: &Env) -> Option<AdminChange> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn remove_pending_admin(env: &Env) {
    env.storage().instance().remove(&PENDING_ADMIN);
}

pub mod utils {
    use super::*;

    use farm::ttl::{INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL};
    use soroban_sdk::{ConversionError, TryFromVal, Val, Vec};

    #[derive(Clone, Copy)]
    #[repr(u32)]
    pub enum DataKey {
        TotalStaked = 0,
        Participants = 1,
    }

    impl TryFromVal<Env, DataKey> for Val {
        type Error = ConversionError;

        fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
            Ok((*v as u32).into())
        }
    }

    pub fn bump_instance(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn save_admin(e: &Env, address: &Address) {
        e.storage().instance().set(&ADMIN, address);
        bump_instance(e);
    }

    pub fn get_admin(e: &Env) -> Address {
        bump_instance(e);

        e.storage().instance().get(&ADMIN).unwrap_or_else(|| {
            log!(e, "Token Farm: Admin not set");
            panic_with_error!(&e, ContractError::AdminNotSet)
        })
    }

    pub fn init_total_staked(e: &Env) {
        e.storage().persistent().set(&DataKey::TotalStaked, &0i128);
        e.storage().persistent().extend_ttl(
            &DataKey::TotalStaked,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }

    pub fn increase_total_staked(e: &Env, amount: i128) -> Result<(), ContractError> {
        let count = get_total_staked_counter(e)
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        save_total_staked(e, count);

        Ok(())
    }

    pub fn decrease_total_staked(e: &Env, amount: i128) -> Result<(), ContractError> {
        let count = get_total_staked_counter(e)
            .checked_sub(amount)
            .ok_or(ContractError::ContractMathError)?;
        save_total_staked(e, count);

        Ok(())
    }

    fn save_total_staked(e: &Env, count: i128) {
        e.storage().persistent().set(&DataKey::TotalStaked, &count);
        e.storage().persistent().extend_ttl(
            &DataKey::TotalStaked,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }

    pub fn get_total_staked_counter(e: &Env) -> i128 {
        let total_staked = e
            .storage()
            .persistent()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0i128);
        e.storage()
            .persistent()
            .has(&DataKey::TotalStaked)
            .then(|| {
                e.storage().persistent().extend_ttl(
                    &DataKey::TotalStaked,
                    PERSISTENT_RENEWAL_THRESHOLD,
                    PERSISTENT_TARGET_TTL,
                )
            });

        total_staked
    }

    // Keep track of everyone who ever deposited to be able to iterate over them on distribution.
    // Addresses are never removed, so the order of first deposit is kept.
    pub fn add_participant(
        e: &Env,
        participant: &Address,
        max_participants: u32,
    ) -> Result<(), ContractError> {
        let mut participants = get_participants(e);
        if participants.len() >= max_participants {
            log!(
                e,
                "Token Farm: Add participant: Registry is full ({} participants)",
                max_participants
            );
            return Err(ContractError::TooManyParticipants);
        }
        participants.push_back(participant.clone());
        e.storage()
            .persistent()
            .set(&DataKey::Participants, &participants);
        e.storage().persistent().extend_ttl(
            &DataKey::Participants,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );

        Ok(())
    }

    pub fn get_participants(e: &Env) -> Vec<Address> {
        let participants = e
            .storage()
            .persistent()
            .get(&DataKey::Participants)
            .unwrap_or_else(|| soroban_sdk::vec![e]);
        e.storage()
            .persistent()
            .has(&DataKey::Participants)
            .then(|| {
                e.storage().persistent().extend_ttl(
                    &DataKey::Participants,
                    PERSISTENT_RENEWAL_THRESHOLD,
                    PERSISTENT_TARGET_TTL,
                )
            });

        participants
    }
}
