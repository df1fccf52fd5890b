use cosmwasm_std::Uint128;
use shared::BASIS_POINTS;

use crate::constants::{COMPOUND_FREQUENCY, MAX_COMPOUND_PERIODS, TICKS_PER_YEAR};
use crate::error::ContractError;
use crate::state::SavingsAccount;

/// Result of folding the elapsed compounding periods into an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundAccrual {
    /// Whole periods folded (after capping)
    pub periods: u64,
    /// `final_amount - balance`
    pub reward: Uint128,
}

/// Linear interest from `start_block` to `current_tick`:
/// `balance * reward_rate * duration / (TICKS_PER_YEAR * 10000)`
pub fn simple_interest(
    account: &SavingsAccount,
    current_tick: u64,
) -> Result<Uint128, ContractError> {
    let duration = current_tick.saturating_sub(account.start_block);
    let numerator = u128::from(account.reward_rate) * u128::from(duration);
    let denominator = u128::from(TICKS_PER_YEAR) * BASIS_POINTS;
    Ok(account
        .balance
        .checked_multiply_ratio(numerator, denominator)?)
}

/// Whole compounding periods elapsed since `last_compound`
pub fn elapsed_periods(account: &SavingsAccount, current_tick: u64) -> u64 {
    current_tick.saturating_sub(account.last_compound) / COMPOUND_FREQUENCY
}

/// Basis points earned per compounding period:
/// `reward_rate * COMPOUND_FREQUENCY / (TICKS_PER_YEAR * 10000)`
pub fn period_rate(reward_rate: u64) -> u128 {
    u128::from(reward_rate) * u128::from(COMPOUND_FREQUENCY)
        / (u128::from(TICKS_PER_YEAR) * BASIS_POINTS)
}

/// Fixed-period compound interest since `last_compound`.
///
/// Each period is applied to the running amount,
/// `amount = floor(amount * (10000 + period_rate) / 10000)`, so earlier
/// periods' interest earns interest too. At most `MAX_COMPOUND_PERIODS`
/// periods are folded per call.
pub fn compound_interest(
    account: &SavingsAccount,
    current_tick: u64,
) -> Result<CompoundAccrual, ContractError> {
    let periods = elapsed_periods(account, current_tick).min(MAX_COMPOUND_PERIODS);
    let step = BASIS_POINTS + period_rate(account.reward_rate);
    if periods == 0 || step == BASIS_POINTS {
        return Ok(CompoundAccrual {
            periods,
            reward: Uint128::zero(),
        });
    }

    let mut amount = account.balance;
    for _ in 0..periods {
        amount = amount.checked_multiply_ratio(step, BASIS_POINTS)?;
    }
    let reward = amount.checked_sub(account.balance)?;

    Ok(CompoundAccrual { periods, reward })
}

/// Reward a mature settlement would pay at `current_tick`
pub fn accrued_rewards(
    account: &SavingsAccount,
    current_tick: u64,
) -> Result<Uint128, ContractError> {
    if account.compounding_enabled {
        Ok(compound_interest(account, current_tick)?.reward)
    } else {
        simple_interest(account, current_tick)
    }
}
