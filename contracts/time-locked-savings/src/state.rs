use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct SavingsAccount {
    /// Principal held, excluding unrealised interest
    pub balance: Uint128,
    /// Tick before which withdrawal is penalised
    pub lock_until: u64,
    /// Tick the account was opened at
    pub start_block: u64,
    /// Annualised rate in basis points, frozen at creation
    pub reward_rate: u64,
    /// Tick of the last compounding event (or compounding toggle)
    pub last_compound: u64,
    /// Owner-controlled compounding switch
    pub compounding_enabled: bool,
}

#[cw_serde]
pub struct Config {
    /// Native denom held in custody
    pub denom: String,
    /// Accounts opened before this tick receive the early deposit bonus
    pub launch_period_end: u64,
}

#[cw_serde]
#[derive(Default)]
pub struct ProtocolStats {
    /// Sum of all live account balances
    pub total_locked: Uint128,
    /// Number of live accounts
    pub total_accounts: u64,
    /// Interest ever credited through compounding
    pub total_compound_interest: Uint128,
}

/// Configuration
pub const CONFIG: Item<Config> = Item::new("config");

/// Savings accounts indexed by owner
pub const ACCOUNTS: Map<&Addr, SavingsAccount> = Map::new("accounts");

/// Protocol-wide totals, created lazily
pub const STATS: Item<ProtocolStats> = Item::new("stats");

pub fn load_account(storage: &dyn Storage, owner: &Addr) -> StdResult<Option<SavingsAccount>> {
    ACCOUNTS.may_load(storage, owner)
}

pub fn save_account(
    storage: &mut dyn Storage,
    owner: &Addr,
    account: &SavingsAccount,
) -> StdResult<()> {
    ACCOUNTS.save(storage, owner, account)
}

pub fn remove_account(storage: &mut dyn Storage, owner: &Addr) {
    ACCOUNTS.remove(storage, owner)
}

pub fn load_stats(storage: &dyn Storage) -> StdResult<ProtocolStats> {
    Ok(STATS.may_load(storage)?.unwrap_or_default())
}
