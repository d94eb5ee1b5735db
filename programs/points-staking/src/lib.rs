#![allow(unexpected_cfgs)]

pub mod account_structs;
/// # points staking - SOL Staking With Reward Points
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - The upgrade authority creates the reward mint (6 decimals) once
///    - Minting is delegated to a program PDA (`["mint_authority"]`)
///
/// 2. Account Creation:
///    - Each user creates one stake account at `["client1", user]`
///    - The account starts with nothing staked and no points
///
/// 3. Staking Flow:
///    a. Stake:
///       - Lamports move from the user into their stake account
///    b. Accrual:
///       - Points grow with staked amount and elapsed time
///       - Every instruction touching the account flushes accrual first,
///         on the stake as it was before the instruction
///    c. Unstake:
///       - Lamports move back from the stake account to the user
///
/// 4. Rewards:
///    - `get_points` flushes accrual and returns the current total
///    - `claim_points` mints the full point total as reward tokens to the
///      user's token account and resets points to zero
///
/// All checks run before any state is written and the token mint is part of
/// the same transaction, so a claim either mints and resets or does neither.
pub mod accrual;
pub mod address;
pub mod error;
pub mod events;
mod guard;
pub mod ledger;
pub mod processor;
pub mod request;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("9dAhsicM6p9GFKcGoTJyzE2G3Lznc5agHgWpuxoPQpFC");

#[program]
pub mod points_staking {
    use super::*;

    /// Creates the reward mint and the config that pins it.
    /// Only the program upgrade authority may call this.
    pub fn initialize_reward_mint(ctx: Context<InitializeRewardMint>) -> Result<()> {
        processor::initialize_reward_mint(ctx)
    }

    /// Creates the caller's stake account:
    /// - fails with AlreadyInitialized if it exists
    pub fn create_pda_account(ctx: Context<CreatePdaAccount>) -> Result<()> {
        processor::create_pda_account(ctx)
    }

    /// Locks `amount` lamports after flushing accrued points
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        processor::stake(ctx, amount)
    }

    /// Returns `amount` lamports to the owner after flushing accrued points
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        processor::unstake(ctx, amount)
    }

    /// Mints all accrued points to the owner's reward token account
    pub fn claim_points(ctx: Context<ClaimPoints>) -> Result<()> {
        processor::claim_points(ctx)
    }

    /// Persists accrual up to now and returns the point total
    pub fn get_points(ctx: Context<GetPoints>) -> Result<u64> {
        processor::get_points(ctx)
    }
}
