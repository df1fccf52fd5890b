// Shared fixed-point helpers for the savings contracts on CosmWasm

use cosmwasm_std::{CheckedMultiplyRatioError, Uint128};

/// 100% expressed in basis points
pub const BASIS_POINTS: u128 = 10_000;

/// Take `bps` basis points of `amount`, truncating toward zero
pub fn apply_basis_points(
    amount: Uint128,
    bps: u64,
) -> Result<Uint128, CheckedMultiplyRatioError> {
    amount.checked_multiply_ratio(bps, BASIS_POINTS)
}

/// A lock has matured once the current tick reaches `lock_until`
pub fn has_matured(current_tick: u64, lock_until: u64) -> bool {
    current_tick >= lock_until
}
