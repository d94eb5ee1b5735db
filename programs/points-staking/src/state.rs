use anchor_lang::prelude::*;

pub const STAKE_ACCOUNT_SEED: &[u8] = b"client1";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
pub const REWARD_MINT_SEED: &[u8] = b"reward_mint";
pub const CONFIG_SEED: &[u8] = b"config";

/// One whole reward token is 10^6 points.
pub const REWARD_MINT_DECIMALS: u8 = 6;

/// Per-owner staking record.
/// PDA: ["client1", owner]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct StakeAccount {
    /// Controlling principal, fixed at creation
    pub owner: Pubkey,

    /// Lamports currently locked in this account on top of its rent reserve
    pub staked_amount: u64,

    /// Points accrued and not yet claimed
    pub total_points: u64,

    /// Unix timestamp of the last accrual flush
    pub last_update_time: i64,

    /// Canonical bump of this account's address
    pub bump: u8,
}

impl StakeAccount {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }
}

/// Written once when the reward mint is created.
/// PDA: ["config"]
#[account]
#[derive(InitSpace)]
pub struct RewardConfig {
    /// Upgrade authority that created the mint. Not read on chain; kept so
    /// indexers can attribute the mint without replaying transactions.
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub mint_authority_bump: u8,
    pub bump: u8,
}

impl RewardConfig {
    pub const LEN: usize = 8 + Self::INIT_SPACE;
}
