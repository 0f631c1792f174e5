extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation},
    Address, Env, IntoVal,
};

use super::setup::{deploy_farm, mine_blocks, set_block, MAX_PARTICIPANTS, ONE_TOKEN};
use crate::{error::ContractError, storage::Participant};

#[test]
fn withdraw_returns_full_stake() {
    let env = Env::default();
    env.mock_all_auths();

    let deployment = deploy_farm(&env, MAX_PARTICIPANTS);
    let user = Address::generate(&env);
    let amount = 100 * ONE_TOKEN;
    deployment.fund(&user, amount);

    deployment.farm.deposit(&user, &amount);
    mine_blocks(&env, 1);
    deployment.farm.distribute_rewards_all(&deployment.owner);

    assert_eq!(deployment.farm.withdraw(&user), amount);
    assert_eq!(
        env.auths(),
        [(
            user.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    deployment.farm.address.clone(),
                    symbol_short!("withdraw"),
                    (&user,).into_val(&env),
                )),
                sub_invocations: std::vec![],
            }
        ),]
    );

    assert_eq!(deployment.lp_token.balance(&user), amount);
    assert_eq!(deployment.lp_token.balance(&deployment.farm.address), 0);
    assert_eq!(deployment.farm.query_staking_balance(&user), 0);
    assert!(!deployment.farm.query_is_staking(&user));
    assert_eq!(deployment.farm.query_total_staked(), 0);
}

#[test]
fn withdraw_keeps_pending_rewards() {
    let env = Env::default();
    env.mock_all_auths();

    let deployment = deploy_farm(&env, MAX_PARTICIPANTS);
    let user = Address::generate(&env);
    deployment.fund(&user, 1_000);

    set_block(&env, 1);
    deployment.farm.deposit(&user, &1_000);
    set_block(&env, 4);
    deployment.farm.distribute_rewards_all(&deployment.owner);

    deployment.farm.withdraw(&user);

    assert_eq!(
        deployment.farm.query_participant(&user),
        Participant {
            staking_balance: 0,
            is_staking: false,
            checkpoint_block: 4,
            pending_rewards: 30,
        }
    );
    // no reward is paid out by withdrawing
    assert_eq!(deployment.dapp_token.balance(&user), 0);
}

#[test]
fn withdraw_without_stake() {
    let env = Env::default();
    env.mock_all_auths();

    let deployment = deploy_farm(&env, MAX_PARTICIPANTS);
    let user = Address::generate(&env);

    assert_eq!(
        deployment.farm.try_withdraw(&user),
        Err(Ok(ContractError::NothingStaked))
    );
}

#[test]
fn withdraw_twice() {
    let env = Env::default();
    env.mock_all_auths();

    let deployment = deploy_farm(&env, MAX_PARTICIPANTS);
    let user = Address::generate(&env);
    deployment.fund(&user, 100);

    deployment.farm.deposit(&user, &100);
    deployment.farm.withdraw(&user);

    assert_eq!(
        deployment.farm.try_withdraw(&user),
        Err(Ok(ContractError::NothingStaked))
    );
    assert_eq!(deployment.lp_token.balance(&user), 100);
}

#[test]
fn total_staked_matches_farm_lp_balance() {
    let env = Env::default();
    env.mock_all_auths();

    let deployment = deploy_farm(&env, MAX_PARTICIPANTS);
    let user1 = Address::generate(&env);
    let user2 = Address::generate(&env);
    deployment.fund(&user1, 1_000);
    deployment.fund(&user2, 1_000);

    let assert_invariants = || {
        let total_staked = deployment.farm.query_total_staked();
        assert_eq!(
            total_staked,
            deployment.lp_token.balance(&deployment.farm.address)
        );
        assert_eq!(
            total_staked,
            deployment.farm.query_staking_balance(&user1)
                + deployment.farm.query_staking_balance(&user2)
        );
        for user in [&user1, &user2] {
            assert_eq!(
                deployment.farm.query_staking_balance(user) > 0,
                deployment.farm.query_is_staking(user)
            );
        }
    };

    deployment.farm.deposit(&user1, &300);
    assert_invariants();
    deployment.farm.deposit(&user2, &700);
    assert_invariants();
    deployment.farm.deposit(&user1, &200);
    assert_invariants();
    deployment.farm.withdraw(&user2);
    assert_invariants();
    deployment.farm.withdraw(&user1);
    assert_invariants();

    assert_eq!(deployment.farm.query_total_staked(), 0);
}
