pub mod clock;
pub mod constants;
pub mod contract;
mod error;
pub mod interest;
pub mod msg;
pub mod rate;
pub mod state;
pub mod stats;
pub mod withdrawal;

pub use crate::error::ContractError;
