use crate::constants::{BASE_RATE, EARLY_DEPOSIT_BONUS, RATE_STEP, TICKS_PER_YEAR};

/// Annualised rate in basis points for a lock of `duration` ticks
pub fn rate(duration: u64) -> u64 {
    // duration * 100 is taken in u128; the quotient is at most ~3.5e16
    let year_percent = u128::from(duration) * 100 / u128::from(TICKS_PER_YEAR);
    BASE_RATE + year_percent as u64 * RATE_STEP
}

/// Extra basis points granted to accounts opened before `launch_period_end`
pub fn early_bonus(current_tick: u64, launch_period_end: u64) -> u64 {
    if is_launch_period(current_tick, launch_period_end) {
        EARLY_DEPOSIT_BONUS
    } else {
        0
    }
}

pub fn is_launch_period(current_tick: u64, launch_period_end: u64) -> bool {
    current_tick < launch_period_end
}

/// Rate frozen into a new account: `rate(duration) + early_bonus(..)`
pub fn account_rate(duration: u64, current_tick: u64, launch_period_end: u64) -> u64 {
    rate(duration) + early_bonus(current_tick, launch_period_end)
}
