use cosmwasm_std::{coins, Addr, BankMsg, Storage, Uint128};
use shared::{apply_basis_points, has_matured};

use crate::constants::EARLY_WITHDRAWAL_PENALTY;
use crate::error::ContractError;
use crate::interest::accrued_rewards;
use crate::state::{remove_account, SavingsAccount};
use crate::stats::{apply_stats, AccountDelta, LockedDelta, StatsDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalMode {
    Early,
    Mature,
}

impl WithdrawalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalMode::Early => "early",
            WithdrawalMode::Mature => "mature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub mode: WithdrawalMode,
    /// Pre-withdrawal balance, the amount released from `total_locked`
    pub principal: Uint128,
    pub penalty: Uint128,
    pub rewards: Uint128,
    pub payout: Uint128,
}

/// Work out what the owner receives at `current_tick` without touching state
pub fn settle(account: &SavingsAccount, current_tick: u64) -> Result<Settlement, ContractError> {
    let principal = account.balance;

    if !has_matured(current_tick, account.lock_until) {
        let penalty = apply_basis_points(principal, EARLY_WITHDRAWAL_PENALTY)?;
        return Ok(Settlement {
            mode: WithdrawalMode::Early,
            principal,
            penalty,
            rewards: Uint128::zero(),
            payout: principal.checked_sub(penalty)?,
        });
    }

    let rewards = accrued_rewards(account, current_tick)?;
    Ok(Settlement {
        mode: WithdrawalMode::Mature,
        principal,
        penalty: Uint128::zero(),
        rewards,
        payout: principal.checked_add(rewards)?,
    })
}

/// Settle, retire the account and release its principal from the totals.
///
/// The returned message moves the payout out of custody; it must be attached
/// to the same response so a failed transfer reverts the whole withdrawal.
pub fn process_withdrawal(
    storage: &mut dyn Storage,
    owner: &Addr,
    account: &SavingsAccount,
    current_tick: u64,
    denom: &str,
) -> Result<(Settlement, BankMsg), ContractError> {
    let settlement = settle(account, current_tick)?;

    remove_account(storage, owner);
    apply_stats(
        storage,
        StatsDelta::locked(
            LockedDelta::Decrease(settlement.principal),
            AccountDelta::Closed,
        ),
    )?;

    let transfer = BankMsg::Send {
        to_address: owner.to_string(),
        amount: coins(settlement.payout.u128(), denom),
    };
    Ok((settlement, transfer))
}
