use cosmwasm_std::{
    coins, entry_point, to_json_binary, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo,
    Order, OverflowError, OverflowOperation, Response, StdError, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use shared::has_matured;

use crate::clock::TickSource;
use crate::constants::{
    COMPOUND_FREQUENCY, DEFAULT_DENOM, DEFAULT_LAUNCH_PERIOD, MINIMUM_LOCK_PERIOD,
};
use crate::error::ContractError;
use crate::interest::{accrued_rewards, compound_interest};
use crate::msg::{
    AccountResponse, AccountsResponse, CompoundInterestResponse, CompoundScheduleResponse,
    ConfigResponse, EstimatedRewardsResponse, ExecuteMsg, InstantiateMsg, LaunchPeriodResponse,
    OwnedAccount, QueryMsg, RewardRateResponse, StatsResponse, WithdrawResponse,
};
use crate::rate::{account_rate, early_bonus, is_launch_period, rate};
use crate::state::{
    load_account, load_stats, save_account, Config, SavingsAccount, ACCOUNTS, CONFIG,
};
use crate::stats::{apply_stats, AccountDelta, LockedDelta, StatsDelta};
use crate::withdrawal::process_withdrawal;

const CONTRACT_NAME: &str = "crates.io:time-locked-savings";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let denom = msg.denom.unwrap_or_else(|| DEFAULT_DENOM.to_string());
    if denom.is_empty() {
        return Err(ContractError::InvalidDenom {});
    }

    let launch_period = msg.launch_period.unwrap_or(DEFAULT_LAUNCH_PERIOD);
    let config = Config {
        denom,
        launch_period_end: env.current_tick().saturating_add(launch_period),
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("denom", config.denom)
        .add_attribute("launch_period_end", config.launch_period_end.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateSavingsAccount {
            duration,
            amount,
            enable_compounding,
        } => execute_create_savings_account(deps, env, info, duration, amount, enable_compounding),
        ExecuteMsg::AddToSavings { amount } => execute_add_to_savings(deps, info, amount),
        ExecuteMsg::ToggleCompounding { enable } => {
            execute_toggle_compounding(deps, env, info, enable)
        }
        ExecuteMsg::CompoundInterest {} => execute_compound_interest(deps, env, info),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
    }
}

/// Sent funds must be exactly `amount` of the custody denom
fn must_deposit(info: &MessageInfo, denom: &str, amount: Uint128) -> Result<(), ContractError> {
    let received: Uint128 = info
        .funds
        .iter()
        .filter(|coin| coin.denom == denom)
        .map(|coin| coin.amount)
        .sum();
    let foreign = info.funds.iter().any(|coin| coin.denom != denom);

    if foreign || received != amount {
        return Err(ContractError::FundsMismatch {
            expected: amount,
            received,
        });
    }
    Ok(())
}

pub fn execute_create_savings_account(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    duration: u64,
    amount: Uint128,
    enable_compounding: bool,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroDeposit {});
    }

    if duration < MINIMUM_LOCK_PERIOD {
        return Err(ContractError::InvalidDuration {});
    }

    let now = env.current_tick();
    let previous = load_account(deps.storage, &info.sender)?;
    if let Some(previous) = &previous {
        if !has_matured(now, previous.lock_until) {
            return Err(ContractError::ExistingLock {});
        }
    }

    let config = CONFIG.load(deps.storage)?;
    must_deposit(&info, &config.denom, amount)?;

    let lock_until = now
        .checked_add(duration)
        .ok_or_else(|| OverflowError::new(OverflowOperation::Add, now, duration))?;
    let reward_rate = account_rate(duration, now, config.launch_period_end);

    let account = SavingsAccount {
        balance: amount,
        lock_until,
        start_block: now,
        reward_rate,
        last_compound: now,
        compounding_enabled: enable_compounding,
    };
    save_account(deps.storage, &info.sender, &account)?;

    // A matured account is replaced: its principal goes back to the owner and
    // its uncollected reward is dropped.
    let mut response = Response::new();
    let delta = match previous {
        None => StatsDelta::locked(LockedDelta::Increase(amount), AccountDelta::Opened),
        Some(previous) => {
            response = response
                .add_message(BankMsg::Send {
                    to_address: info.sender.to_string(),
                    amount: coins(previous.balance.u128(), &config.denom),
                })
                .add_attribute("refunded", previous.balance);
            StatsDelta::locked(
                LockedDelta::net(amount, previous.balance),
                AccountDelta::Unchanged,
            )
        }
    };
    apply_stats(deps.storage, delta)?;

    Ok(response
        .add_attribute("method", "create_savings_account")
        .add_attribute("owner", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("lock_until", lock_until.to_string())
        .add_attribute("reward_rate", reward_rate.to_string())
        .add_attribute("compounding", enable_compounding.to_string()))
}

pub fn execute_add_to_savings(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let mut account =
        load_account(deps.storage, &info.sender)?.ok_or(ContractError::NoAccount {})?;

    if amount.is_zero() {
        return Err(ContractError::ZeroDeposit {});
    }

    let config = CONFIG.load(deps.storage)?;
    must_deposit(&info, &config.denom, amount)?;

    account.balance = account.balance.checked_add(amount)?;
    save_account(deps.storage, &info.sender, &account)?;
    apply_stats(
        deps.storage,
        StatsDelta::locked(LockedDelta::Increase(amount), AccountDelta::Unchanged),
    )?;

    Ok(Response::new()
        .add_attribute("method", "add_to_savings")
        .add_attribute("owner", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", account.balance))
}

pub fn execute_toggle_compounding(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    enable: bool,
) -> Result<Response, ContractError> {
    let mut account =
        load_account(deps.storage, &info.sender)?.ok_or(ContractError::NoAccount {})?;

    account.compounding_enabled = enable;
    account.last_compound = env.current_tick();
    save_account(deps.storage, &info.sender, &account)?;

    Ok(Response::new()
        .add_attribute("method", "toggle_compounding")
        .add_attribute("owner", info.sender)
        .add_attribute("enabled", enable.to_string())
        .add_attribute("last_compound", account.last_compound.to_string()))
}

pub fn execute_compound_interest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut account =
        load_account(deps.storage, &info.sender)?.ok_or(ContractError::NoAccount {})?;

    if !account.compounding_enabled {
        return Err(ContractError::NotAuthorized {});
    }

    let now = env.current_tick();
    if now.saturating_sub(account.last_compound) < COMPOUND_FREQUENCY {
        return Err(ContractError::CompoundTooEarly {});
    }

    let accrual = compound_interest(&account, now)?;
    account.balance = account.balance.checked_add(accrual.reward)?;
    account.last_compound = now;
    save_account(deps.storage, &info.sender, &account)?;
    apply_stats(
        deps.storage,
        StatsDelta {
            locked: LockedDelta::Increase(accrual.reward),
            accounts: AccountDelta::Unchanged,
            compound_interest: accrual.reward,
        },
    )?;

    Ok(Response::new()
        .set_data(to_json_binary(&CompoundInterestResponse {
            reward: accrual.reward,
        })?)
        .add_attribute("method", "compound_interest")
        .add_attribute("owner", info.sender)
        .add_attribute("periods", accrual.periods.to_string())
        .add_attribute("reward", accrual.reward)
        .add_attribute("balance", account.balance))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let account = load_account(deps.storage, &info.sender)?.ok_or(ContractError::NoAccount {})?;
    let config = CONFIG.load(deps.storage)?;

    let (settlement, transfer) = process_withdrawal(
        deps.storage,
        &info.sender,
        &account,
        env.current_tick(),
        &config.denom,
    )?;

    Ok(Response::new()
        .add_message(transfer)
        .set_data(to_json_binary(&WithdrawResponse {
            payout: settlement.payout,
        })?)
        .add_attribute("method", "withdraw")
        .add_attribute("owner", info.sender)
        .add_attribute("mode", settlement.mode.as_str())
        .add_attribute("principal", settlement.principal)
        .add_attribute("penalty", settlement.penalty)
        .add_attribute("rewards", settlement.rewards)
        .add_attribute("payout", settlement.payout))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetConfig {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetAccount { owner } => to_json_binary(&query_account(deps, owner)?),
        QueryMsg::ListAccounts { start_after, limit } => {
            to_json_binary(&query_list_accounts(deps, start_after, limit)?)
        }
        QueryMsg::GetCompoundSchedule { owner } => {
            to_json_binary(&query_compound_schedule(deps, owner)?)
        }
        QueryMsg::GetEstimatedRewards { owner } => {
            to_json_binary(&query_estimated_rewards(deps, env, owner)?)
        }
        QueryMsg::GetCurrentRewardRate { duration } => {
            to_json_binary(&query_current_reward_rate(deps, env, duration)?)
        }
        QueryMsg::GetTotalStats {} => to_json_binary(&query_total_stats(deps)?),
        QueryMsg::IsLaunchPeriod {} => to_json_binary(&query_is_launch_period(deps, env)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        denom: config.denom,
        launch_period_end: config.launch_period_end,
    })
}

fn query_account(deps: Deps, owner: String) -> StdResult<AccountResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    Ok(AccountResponse {
        account: load_account(deps.storage, &owner_addr)?,
    })
}

/// Like `query_account` but an absent account is an error
fn existing_account(deps: Deps, owner: &str) -> StdResult<SavingsAccount> {
    let owner_addr = deps.api.addr_validate(owner)?;
    load_account(deps.storage, &owner_addr)?
        .ok_or_else(|| StdError::generic_err(ContractError::NoAccount {}.to_string()))
}

fn query_list_accounts(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AccountsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|owner| deps.api.addr_validate(&owner))
        .transpose()?;
    let start = start_addr.as_ref().map(|addr| Bound::exclusive(addr));

    let accounts = ACCOUNTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(owner, account)| OwnedAccount { owner, account }))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AccountsResponse { accounts })
}

fn query_compound_schedule(deps: Deps, owner: String) -> StdResult<CompoundScheduleResponse> {
    let account = existing_account(deps, &owner)?;
    Ok(CompoundScheduleResponse {
        enabled: account.compounding_enabled,
        next_compound_tick: account.last_compound.saturating_add(COMPOUND_FREQUENCY),
        balance: account.balance,
    })
}

fn query_estimated_rewards(
    deps: Deps,
    env: Env,
    owner: String,
) -> StdResult<EstimatedRewardsResponse> {
    let account = existing_account(deps, &owner)?;
    let rewards = accrued_rewards(&account, env.current_tick())
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    Ok(EstimatedRewardsResponse { rewards })
}

fn query_current_reward_rate(
    deps: Deps,
    env: Env,
    duration: u64,
) -> StdResult<RewardRateResponse> {
    let config = CONFIG.load(deps.storage)?;
    let now = env.current_tick();
    Ok(RewardRateResponse {
        rate: rate(duration) + early_bonus(now, config.launch_period_end),
        early_bonus: early_bonus(now, config.launch_period_end),
    })
}

fn query_total_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = load_stats(deps.storage)?;
    Ok(StatsResponse {
        total_locked: stats.total_locked,
        total_accounts: stats.total_accounts,
        total_compound_interest: stats.total_compound_interest,
    })
}

fn query_is_launch_period(deps: Deps, env: Env) -> StdResult<LaunchPeriodResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(LaunchPeriodResponse {
        is_launch_period: is_launch_period(env.current_tick(), config.launch_period_end),
        launch_period_end: config.launch_period_end,
    })
}
