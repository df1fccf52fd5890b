use cosmwasm_std::{coins, Addr, Empty, Uint128};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use time_locked_savings::constants::{COMPOUND_FREQUENCY, TICKS_PER_YEAR};
use time_locked_savings::contract::{execute, instantiate, query};
use time_locked_savings::msg::{
    AccountResponse, AccountsResponse, EstimatedRewardsResponse, ExecuteMsg, InstantiateMsg,
    QueryMsg, StatsResponse,
};
use time_locked_savings::ContractError;

const DENOM: &str = "uatom";
const INITIAL: u128 = 10_000_000_000;

type ExecResult = Result<(), ContractError>;

fn savings_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}

fn setup() -> (App, Addr) {
    let mut app = App::new(|router, _api, storage| {
        for who in ["alice", "bob", "carol", "treasury"] {
            router
                .bank
                .init_balance(storage, &Addr::unchecked(who), coins(INITIAL, DENOM))
                .unwrap();
        }
    });

    let code_id = app.store_code(savings_contract());
    let contract = app
        .instantiate_contract(
            code_id,
            Addr::unchecked("creator"),
            &InstantiateMsg {
                denom: None,
                launch_period: None,
            },
            &[],
            "time-locked-savings",
            None,
        )
        .unwrap();
    (app, contract)
}

fn balance(app: &App, who: &str) -> u128 {
    app.wrap().query_balance(who, DENOM).unwrap().amount.u128()
}

fn create(
    app: &mut App,
    contract: &Addr,
    owner: &str,
    duration: u64,
    amount: u128,
    enable_compounding: bool,
) -> ExecResult {
    app.execute_contract(
        Addr::unchecked(owner),
        contract.clone(),
        &ExecuteMsg::CreateSavingsAccount {
            duration,
            amount: Uint128::new(amount),
            enable_compounding,
        },
        &coins(amount, DENOM),
    )
    .map(|_| ())
    .map_err(|err| err.downcast::<ContractError>().unwrap())
}

fn withdraw(app: &mut App, contract: &Addr, owner: &str) -> ExecResult {
    app.execute_contract(
        Addr::unchecked(owner),
        contract.clone(),
        &ExecuteMsg::Withdraw {},
        &[],
    )
    .map(|_| ())
    .map_err(|err| err.downcast::<ContractError>().unwrap())
}

fn account(app: &App, contract: &Addr, owner: &str) -> AccountResponse {
    app.wrap()
        .query_wasm_smart(
            contract.clone(),
            &QueryMsg::GetAccount {
                owner: owner.to_string(),
            },
        )
        .unwrap()
}

fn stats(app: &App, contract: &Addr) -> StatsResponse {
    app.wrap()
        .query_wasm_smart(contract.clone(), &QueryMsg::GetTotalStats {})
        .unwrap()
}

fn assert_totals_consistent(app: &App, contract: &Addr) {
    let page: AccountsResponse = app
        .wrap()
        .query_wasm_smart(
            contract.clone(),
            &QueryMsg::ListAccounts {
                start_after: None,
                limit: Some(30),
            },
        )
        .unwrap();
    let live: Uint128 = page.accounts.iter().map(|a| a.account.balance).sum();
    let stats = stats(app, contract);
    assert_eq!(stats.total_locked, live);
    assert_eq!(stats.total_accounts, page.accounts.len() as u64);
    assert!(balance(app, contract.as_str()) >= live.u128());
}

#[test]
fn deposit_moves_funds_into_custody() {
    let (mut app, contract) = setup();

    create(&mut app, &contract, "alice", 2_000, 1_000_000_000, false).unwrap();

    assert_eq!(balance(&app, "alice"), INITIAL - 1_000_000_000);
    assert_eq!(balance(&app, contract.as_str()), 1_000_000_000);

    app.execute_contract(
        Addr::unchecked("alice"),
        contract.clone(),
        &ExecuteMsg::AddToSavings {
            amount: Uint128::new(5_000),
        },
        &coins(5_000, DENOM),
    )
    .unwrap();

    assert_eq!(balance(&app, contract.as_str()), 1_000_005_000);
    let acct = account(&app, &contract, "alice").account.unwrap();
    assert_eq!(acct.balance, Uint128::new(1_000_005_000));
    assert_totals_consistent(&app, &contract);
}

#[test]
fn rejected_deposit_leaves_no_trace() {
    let (mut app, contract) = setup();

    let err = app
        .execute_contract(
            Addr::unchecked("alice"),
            contract.clone(),
            &ExecuteMsg::CreateSavingsAccount {
                duration: 2_000,
                amount: Uint128::new(1_000),
                enable_compounding: false,
            },
            &coins(400, DENOM),
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::FundsMismatch { .. }
    ));

    assert_eq!(balance(&app, "alice"), INITIAL);
    assert_eq!(balance(&app, contract.as_str()), 0);
    assert!(account(&app, &contract, "alice").account.is_none());
}

#[test]
fn early_withdrawal_keeps_penalty_in_custody() {
    let (mut app, contract) = setup();

    create(&mut app, &contract, "alice", 2_000, 1_000_000_000, false).unwrap();
    app.update_block(|block| block.height += 1_000);

    withdraw(&mut app, &contract, "alice").unwrap();

    assert_eq!(balance(&app, "alice"), INITIAL - 100_000_000);
    assert_eq!(balance(&app, contract.as_str()), 100_000_000);
    assert!(account(&app, &contract, "alice").account.is_none());

    let stats = stats(&app, &contract);
    assert!(stats.total_locked.is_zero());
    assert_eq!(stats.total_accounts, 0);
}

#[test]
fn mature_withdrawal_pays_estimated_rewards() {
    let (mut app, contract) = setup();

    create(&mut app, &contract, "alice", TICKS_PER_YEAR, 1_000_000_000, false).unwrap();
    app.send_tokens(
        Addr::unchecked("treasury"),
        contract.clone(),
        &coins(1_000_000_000, DENOM),
    )
    .unwrap();
    app.update_block(|block| block.height += TICKS_PER_YEAR);

    let estimate: EstimatedRewardsResponse = app
        .wrap()
        .query_wasm_smart(
            contract.clone(),
            &QueryMsg::GetEstimatedRewards {
                owner: "alice".to_string(),
            },
        )
        .unwrap();
    // 5% base + 100 steps of 0.5% + 2% launch bonus
    assert_eq!(estimate.rewards, Uint128::new(570_000_000));

    withdraw(&mut app, &contract, "alice").unwrap();

    assert_eq!(balance(&app, "alice"), INITIAL + 570_000_000);
    assert_eq!(balance(&app, contract.as_str()), 1_000_000_000 - 570_000_000);
    assert_totals_consistent(&app, &contract);
}

#[test]
fn failed_payout_reverts_withdrawal() {
    let (mut app, contract) = setup();

    // No reward reserve: custody only holds the principal
    create(&mut app, &contract, "alice", TICKS_PER_YEAR, 1_000_000_000, false).unwrap();
    app.update_block(|block| block.height += TICKS_PER_YEAR);

    let err = app
        .execute_contract(
            Addr::unchecked("alice"),
            contract.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
        .unwrap_err();
    assert!(err.downcast::<ContractError>().is_err());

    assert!(account(&app, &contract, "alice").account.is_some());
    assert_eq!(balance(&app, "alice"), INITIAL - 1_000_000_000);
    let stats = stats(&app, &contract);
    assert_eq!(stats.total_locked, Uint128::new(1_000_000_000));
    assert_eq!(stats.total_accounts, 1);
}

#[test]
fn compounding_follows_block_height() {
    let (mut app, contract) = setup();

    create(&mut app, &contract, "bob", 2_000, 1_000_000, true).unwrap();

    let compound = |app: &mut App| {
        app.execute_contract(
            Addr::unchecked("bob"),
            contract.clone(),
            &ExecuteMsg::CompoundInterest {},
            &[],
        )
    };

    let err = compound(&mut app).unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::CompoundTooEarly {}
    ));

    app.update_block(|block| block.height += COMPOUND_FREQUENCY);
    let res = compound(&mut app).unwrap();
    assert!(res.events.iter().any(|event| event
        .attributes
        .iter()
        .any(|attr| attr.key == "method" && attr.value == "compound_interest")));

    let acct = account(&app, &contract, "bob").account.unwrap();
    assert_eq!(acct.last_compound, app.block_info().height);
    assert_totals_consistent(&app, &contract);
}

#[test]
fn total_locked_matches_live_balances_across_owners() {
    let (mut app, contract) = setup();
    app.send_tokens(
        Addr::unchecked("treasury"),
        contract.clone(),
        &coins(5_000_000_000, DENOM),
    )
    .unwrap();

    create(&mut app, &contract, "alice", 2_000, 300_000, false).unwrap();
    assert_totals_consistent(&app, &contract);
    create(&mut app, &contract, "bob", 5_000, 900_000, true).unwrap();
    assert_totals_consistent(&app, &contract);

    app.update_block(|block| block.height += 500);
    create(&mut app, &contract, "carol", 1_440, 42, false).unwrap();
    assert_totals_consistent(&app, &contract);

    let err = create(&mut app, &contract, "alice", 2_000, 1, false).unwrap_err();
    assert!(matches!(err, ContractError::ExistingLock {}));
    assert_totals_consistent(&app, &contract);

    app.update_block(|block| block.height += 1_500);
    // alice matured: re-creating refunds the old principal
    let before = balance(&app, "alice");
    create(&mut app, &contract, "alice", 3_000, 10_000, false).unwrap();
    assert_eq!(balance(&app, "alice"), before - 10_000 + 300_000);
    assert_totals_consistent(&app, &contract);

    withdraw(&mut app, &contract, "bob").unwrap();
    assert_totals_consistent(&app, &contract);

    app.update_block(|block| block.height += 10_000);
    withdraw(&mut app, &contract, "carol").unwrap();
    withdraw(&mut app, &contract, "alice").unwrap();
    assert_totals_consistent(&app, &contract);

    let stats = stats(&app, &contract);
    assert!(stats.total_locked.is_zero());
    assert_eq!(stats.total_accounts, 0);

    let err = withdraw(&mut app, &contract, "alice").unwrap_err();
    assert!(matches!(err, ContractError::NoAccount {}));
}
