use crate::error::StakeError;
use anchor_lang::prelude::*;

pub const POINTS_PER_SOL_PER_DAY: u64 = 1_000_000;
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Points earned per staked lamport per second, as an exact fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccrualConfig {
    pub rate_numerator: u64,
    pub rate_denominator: u64,
}

/// Deployed rate: 10^6 points (one reward token) per staked SOL per day.
pub const ACCRUAL: AccrualConfig = AccrualConfig::new(
    POINTS_PER_SOL_PER_DAY,
    LAMPORTS_PER_SOL * SECONDS_PER_DAY,
);

impl AccrualConfig {
    pub const fn new(rate_numerator: u64, rate_denominator: u64) -> Self {
        Self {
            rate_numerator,
            rate_denominator,
        }
    }

    /// floor(staked_amount * elapsed_seconds * rate), computed in u128.
    pub fn points_earned(&self, staked_amount: u64, elapsed_seconds: u64) -> Result<u64> {
        let points = (staked_amount as u128)
            .checked_mul(elapsed_seconds as u128)
            .ok_or(StakeError::Overflow)?
            .checked_mul(self.rate_numerator as u128)
            .ok_or(StakeError::Overflow)?
            .checked_div(self.rate_denominator as u128)
            .ok_or(StakeError::Overflow)?;

        u64::try_from(points).map_err(|_| error!(StakeError::Overflow))
    }
}

/// Seconds between the last flush and `now`. A clock that went backwards is
/// rejected rather than clamped.
pub fn elapsed_seconds(last_update_time: i64, now: i64) -> Result<u64> {
    let elapsed = now
        .checked_sub(last_update_time)
        .ok_or(StakeError::InvalidTimestamp)?;
    require!(elapsed >= 0, StakeError::InvalidTimestamp);
    Ok(elapsed as u64)
}

/// New point total after flushing accrual on the pre-mutation stake.
pub fn accrue(
    total_points: u64,
    staked_amount: u64,
    last_update_time: i64,
    now: i64,
    config: &AccrualConfig,
) -> Result<u64> {
    let elapsed = elapsed_seconds(last_update_time, now)?;
    if elapsed == 0 || staked_amount == 0 {
        return Ok(total_points);
    }

    let earned = config.points_earned(staked_amount, elapsed)?;
    total_points
        .checked_add(earned)
        .ok_or_else(|| error!(StakeError::Overflow))
}
