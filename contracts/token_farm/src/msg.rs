use soroban_sdk::{contracttype, Address, Vec};

use crate::storage::Config;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigResponse {
    pub config: Config,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantsResponse {
    /// Every address that has ever deposited, in order of first deposit
    pub participants: Vec<Address>,
}
