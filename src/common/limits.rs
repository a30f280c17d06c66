use crate::common::money::Money;

// Branch policy constants, in the smallest currency unit. Fixed at compile
// time; the reference branch does not make these operator-configurable.
pub const MIN_DEPOSIT: Money = Money::new(500_00);
pub const MAX_DEPOSIT: Money = Money::new(100_000_00);
pub const MIN_WITHDRAWAL: Money = Money::new(500_00);
pub const DAILY_WITHDRAWAL_LIMIT: Money = Money::new(50_000_00);

pub const MAX_FAILED_ATTEMPTS: u32 = 3;
pub const INACTIVITY_LOCK_DAYS: i64 = 180;

/// Savings interest, basis points per annum, posted monthly.
pub const ANNUAL_INTEREST_RATE_BPS: i64 = 400;
