use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    MultiplyRatio(#[from] CheckedMultiplyRatioError),

    #[error("Not authorized")]
    NotAuthorized {},

    #[error("Lock duration is below the minimum lock period")]
    InvalidDuration {},

    #[error("No savings account for sender")]
    NoAccount {},

    #[error("Savings are still locked")]
    StillLocked {},

    #[error("Deposit amount must be greater than zero")]
    ZeroDeposit {},

    #[error("Compounding period has not elapsed yet")]
    CompoundTooEarly {},

    #[error("Sender already has a locked savings account")]
    ExistingLock {},

    #[error("Invalid denom")]
    InvalidDenom {},

    #[error("Sent funds do not match deposit (expected {expected}, received {received})")]
    FundsMismatch {
        expected: Uint128,
        received: Uint128,
    },

    #[error("Protocol statistics invariant violated: {field} would go below zero")]
    StatsInvariant { field: String },
}
