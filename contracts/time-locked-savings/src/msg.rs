use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::state::SavingsAccount;

#[cw_serde]
pub struct InstantiateMsg {
    /// Custody denom (default "uatom")
    pub denom: Option<String>,
    /// Launch window in ticks from instantiation
    pub launch_period: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open a savings account, sending exactly `amount` of the custody denom
    CreateSavingsAccount {
        duration: u64,
        amount: Uint128,
        enable_compounding: bool,
    },
    /// Top up the sender's account
    AddToSavings { amount: Uint128 },
    /// Switch compounding on or off; restarts the compounding clock
    ToggleCompounding { enable: bool },
    /// Credit compound interest for the elapsed periods
    CompoundInterest {},
    /// Close the account, early (penalised) or mature (with rewards)
    Withdraw {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get config
    #[returns(ConfigResponse)]
    GetConfig {},

    /// Get account of an owner, if any
    #[returns(AccountResponse)]
    GetAccount { owner: String },

    /// List accounts ordered by owner
    #[returns(AccountsResponse)]
    ListAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Compounding status of an owner's account
    #[returns(CompoundScheduleResponse)]
    GetCompoundSchedule { owner: String },

    /// Reward a mature settlement would pay now
    #[returns(EstimatedRewardsResponse)]
    GetEstimatedRewards { owner: String },

    /// Rate a new account with this duration would get now
    #[returns(RewardRateResponse)]
    GetCurrentRewardRate { duration: u64 },

    /// Protocol-wide totals
    #[returns(StatsResponse)]
    GetTotalStats {},

    /// Whether new accounts still earn the launch bonus
    #[returns(LaunchPeriodResponse)]
    IsLaunchPeriod {},
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub denom: String,
    pub launch_period_end: u64,
}

#[cw_serde]
pub struct AccountResponse {
    pub account: Option<SavingsAccount>,
}

#[cw_serde]
pub struct OwnedAccount {
    pub owner: Addr,
    pub account: SavingsAccount,
}

#[cw_serde]
pub struct AccountsResponse {
    pub accounts: Vec<OwnedAccount>,
}

#[cw_serde]
pub struct CompoundScheduleResponse {
    pub enabled: bool,
    pub next_compound_tick: u64,
    pub balance: Uint128,
}

#[cw_serde]
pub struct EstimatedRewardsResponse {
    pub rewards: Uint128,
}

#[cw_serde]
pub struct RewardRateResponse {
    /// Rate in basis points, launch bonus included
    pub rate: u64,
    /// Bonus part of `rate`
    pub early_bonus: u64,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_locked: Uint128,
    pub total_accounts: u64,
    pub total_compound_interest: Uint128,
}

#[cw_serde]
pub struct LaunchPeriodResponse {
    pub is_launch_period: bool,
    pub launch_period_end: u64,
}

// Execute data payloads

#[cw_serde]
pub struct CompoundInterestResponse {
    pub reward: Uint128,
}

#[cw_serde]
pub struct WithdrawResponse {
    pub payout: Uint128,
}
