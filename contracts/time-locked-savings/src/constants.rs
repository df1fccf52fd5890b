/// 144 ticks per day, 365 days
pub const TICKS_PER_YEAR: u64 = 52_560;

/// Annualised rate every account starts from (5%)
pub const BASE_RATE: u64 = 500;

/// Added per whole percent of a year the funds are locked
pub const RATE_STEP: u64 = 50;

/// Bonus for accounts opened during the launch period (2%)
pub const EARLY_DEPOSIT_BONUS: u64 = 200;

/// Shortest lock accepted at creation (~10 days)
pub const MINIMUM_LOCK_PERIOD: u64 = 1_440;

/// Ticks between compounding events (~1 day)
pub const COMPOUND_FREQUENCY: u64 = 144;

/// Penalty taken from the principal on early withdrawal (10%)
pub const EARLY_WITHDRAWAL_PENALTY: u64 = 1_000;

/// Launch window length used when instantiation does not override it (~30 days)
pub const DEFAULT_LAUNCH_PERIOD: u64 = 4_320;

pub const DEFAULT_DENOM: &str = "uatom";

/// Upper bound on compounding periods folded in a single computation (~10 years)
pub const MAX_COMPOUND_PERIODS: u64 = 3_650;
