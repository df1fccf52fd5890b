use cosmwasm_std::{Storage, Uint128};

use crate::error::ContractError;
use crate::state::{load_stats, ProtocolStats, STATS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountDelta {
    Opened,
    Unchanged,
    Closed,
}

/// Change in locked value: added to or released from custody
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockedDelta {
    Increase(Uint128),
    Decrease(Uint128),
}

impl LockedDelta {
    /// `incoming - outgoing`, expressed without a signed integer
    pub fn net(incoming: Uint128, outgoing: Uint128) -> Self {
        if incoming >= outgoing {
            LockedDelta::Increase(incoming - outgoing)
        } else {
            LockedDelta::Decrease(outgoing - incoming)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsDelta {
    pub locked: LockedDelta,
    pub accounts: AccountDelta,
    pub compound_interest: Uint128,
}

impl StatsDelta {
    pub fn locked(locked: LockedDelta, accounts: AccountDelta) -> Self {
        StatsDelta {
            locked,
            accounts,
            compound_interest: Uint128::zero(),
        }
    }
}

impl ProtocolStats {
    /// Fold `delta` into the totals. Going below zero is a sequencing bug and
    /// is reported as `StatsInvariant`, never clamped.
    pub fn apply(&mut self, delta: StatsDelta) -> Result<(), ContractError> {
        let total_locked = match delta.locked {
            LockedDelta::Increase(amount) => self.total_locked.checked_add(amount)?,
            LockedDelta::Decrease(amount) => {
                self.total_locked
                    .checked_sub(amount)
                    .map_err(|_| ContractError::StatsInvariant {
                        field: "total_locked".to_string(),
                    })?
            }
        };

        let total_accounts = match delta.accounts {
            AccountDelta::Opened => self.total_accounts + 1,
            AccountDelta::Unchanged => self.total_accounts,
            AccountDelta::Closed => {
                self.total_accounts
                    .checked_sub(1)
                    .ok_or_else(|| ContractError::StatsInvariant {
                        field: "total_accounts".to_string(),
                    })?
            }
        };

        let total_compound_interest = self
            .total_compound_interest
            .checked_add(delta.compound_interest)?;

        self.total_locked = total_locked;
        self.total_accounts = total_accounts;
        self.total_compound_interest = total_compound_interest;
        Ok(())
    }
}

/// Load, fold and persist the global record in one step
pub fn apply_stats(
    storage: &mut dyn Storage,
    delta: StatsDelta,
) -> Result<ProtocolStats, ContractError> {
    let mut stats = load_stats(storage)?;
    stats.apply(delta)?;
    STATS.save(storage, &stats)?;
    Ok(stats)
}
