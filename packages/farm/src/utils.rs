use soroban_sdk::{contracttype, Address, Env};

/// Pending ownership transfer of a farm contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    /// Address that has to accept the change
    pub new_admin: Address,
    /// Ledger timestamp after which the proposal can no longer be accepted
    pub time_limit: Option<u64>,
}

impl AdminChange {
    pub fn is_expired(&self, env: &Env) -> bool {
        is_past_time_limit(env.ledger().timestamp(), self.time_limit)
    }
}

pub fn is_past_time_limit(now: u64, time_limit: Option<u64>) -> bool {
    match time_limit {
        Some(limit) => now > limit,
        None => false,
    }
}
