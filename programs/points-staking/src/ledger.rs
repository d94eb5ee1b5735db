use crate::accrual::{accrue, AccrualConfig};
use crate::error::StakeError;
use crate::state::StakeAccount;
use anchor_lang::prelude::*;

// Every transition computes the new fields first, runs the external effect
// (lamport move or mint) and only then writes them back, so a failure at any
// step leaves the record untouched.
impl StakeAccount {
    pub fn initialize(&mut self, owner: Pubkey, now: i64, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), StakeError::AlreadyInitialized);

        self.owner = owner;
        self.staked_amount = 0;
        self.total_points = 0;
        self.last_update_time = now;
        self.bump = bump;
        Ok(())
    }

    pub fn authorize(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *signer, StakeError::Unauthorized);
        Ok(())
    }

    /// Point total as of `now`, without writing anything.
    pub fn pending_points(&self, now: i64, config: &AccrualConfig) -> Result<u64> {
        accrue(
            self.total_points,
            self.staked_amount,
            self.last_update_time,
            now,
            config,
        )
    }

    /// Locks `amount` more lamports. `deposit` moves the lamports into the
    /// account and runs after every check has passed.
    pub fn stake<F>(
        &mut self,
        signer: &Pubkey,
        amount: u64,
        now: i64,
        config: &AccrualConfig,
        deposit: F,
    ) -> Result<()>
    where
        F: FnOnce(u64) -> Result<()>,
    {
        self.authorize(signer)?;
        require!(amount > 0, StakeError::InvalidAmount);

        let total_points = self.pending_points(now, config)?;
        let staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;

        deposit(amount)?;

        self.commit(staked_amount, total_points, now);
        Ok(())
    }

    /// Releases `amount` lamports. `withdraw` pays them back to the owner.
    pub fn unstake<F>(
        &mut self,
        signer: &Pubkey,
        amount: u64,
        now: i64,
        config: &AccrualConfig,
        withdraw: F,
    ) -> Result<()>
    where
        F: FnOnce(u64) -> Result<()>,
    {
        self.authorize(signer)?;
        require!(amount > 0, StakeError::InvalidAmount);
        require!(
            amount <= self.staked_amount,
            StakeError::InsufficientStake
        );

        let total_points = self.pending_points(now, config)?;
        let staked_amount = self
            .staked_amount
            .checked_sub(amount)
            .ok_or(StakeError::Underflow)?;

        withdraw(amount)?;

        self.commit(staked_amount, total_points, now);
        Ok(())
    }

    /// Flushes accrual into the stored total and returns it.
    pub fn refresh_points(
        &mut self,
        signer: &Pubkey,
        now: i64,
        config: &AccrualConfig,
    ) -> Result<u64> {
        self.authorize(signer)?;

        let total_points = self.pending_points(now, config)?;
        self.commit(self.staked_amount, total_points, now);
        Ok(total_points)
    }

    /// Flushes accrual and hands the whole total to `mint`. Points are reset
    /// only once `mint` succeeds. Returns the amount minted.
    pub fn claim_points<F>(
        &mut self,
        signer: &Pubkey,
        now: i64,
        config: &AccrualConfig,
        mint: F,
    ) -> Result<u64>
    where
        F: FnOnce(u64) -> Result<()>,
    {
        self.authorize(signer)?;

        let claimable = self.pending_points(now, config)?;
        require!(claimable > 0, StakeError::InvalidAmount);

        mint(claimable)?;

        self.commit(self.staked_amount, 0, now);
        Ok(claimable)
    }

    fn commit(&mut self, staked_amount: u64, total_points: u64, now: i64) {
        self.staked_amount = staked_amount;
        self.total_points = total_points;
        self.last_update_time = now;
    }
}
