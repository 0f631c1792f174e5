use farm_token::{Token, TokenClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

use crate::contract::{TokenFarm, TokenFarmClient};

/// One whole token with 18 decimals.
pub const ONE_TOKEN: i128 = 1_000_000_000_000_000_000;
pub const MAX_PARTICIPANTS: u32 = 10;
const APPROVAL_EXPIRATION_LEDGER: u32 = 1_000;

pub fn deploy_token_contract<'a>(
    env: &Env,
    admin: &Address,
    name: &str,
    symbol: &str,
) -> TokenClient<'a> {
    TokenClient::new(
        env,
        &env.register(
            Token,
            (
                admin,
                18u32,
                String::from_str(env, name),
                String::from_str(env, symbol),
            ),
        ),
    )
}

pub fn deploy_token_farm_contract<'a>(
    env: &Env,
    admin: &Address,
    dapp_token: &Address,
    lp_token: &Address,
    max_participants: u32,
) -> TokenFarmClient<'a> {
    TokenFarmClient::new(
        env,
        &env.register(
            TokenFarm,
            (admin, dapp_token, lp_token, max_participants),
        ),
    )
}

pub struct Deployment<'a> {
    pub owner: Address,
    pub dapp_token: TokenClient<'a>,
    pub lp_token: TokenClient<'a>,
    pub farm: TokenFarmClient<'a>,
}

/// DappToken, LPToken and the farm, with DappToken minting handed over to the farm.
pub fn deploy_farm<'a>(env: &Env, max_participants: u32) -> Deployment<'a> {
    let owner = Address::generate(env);
    let dapp_token = deploy_token_contract(env, &owner, "DappToken", "DAPP");
    let lp_token = deploy_token_contract(env, &owner, "LPToken", "LPT");
    let farm = deploy_token_farm_contract(
        env,
        &owner,
        &dapp_token.address,
        &lp_token.address,
        max_participants,
    );
    dapp_token.set_admin(&farm.address);

    Deployment {
        owner,
        dapp_token,
        lp_token,
        farm,
    }
}

impl Deployment<'_> {
    /// Mints LP tokens to `user` and approves the farm to pull all of them.
    pub fn fund(&self, user: &Address, amount: i128) {
        self.lp_token.mint(user, &amount);
        self.lp_token.approve(
            user,
            &self.farm.address,
            &amount,
            &APPROVAL_EXPIRATION_LEDGER,
        );
    }
}

pub fn set_block(env: &Env, sequence_number: u32) {
    env.ledger().with_mut(|li| li.sequence_number = sequence_number);
}

pub fn mine_blocks(env: &Env, blocks: u32) {
    env.ledger().with_mut(|li| li.sequence_number += blocks);
}
