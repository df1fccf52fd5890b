use cosmwasm_std::{BlockInfo, Env};

/// Block height is the ledger's only clock
pub trait TickSource {
    /// Current, monotonically increasing tick
    fn current_tick(&self) -> u64;
}

impl TickSource for BlockInfo {
    fn current_tick(&self) -> u64 {
        self.height
    }
}

impl TickSource for Env {
    fn current_tick(&self) -> u64 {
        self.block.current_tick()
    }
}
