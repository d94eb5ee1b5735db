use anchor_lang::prelude::*;

#[event]
pub struct RewardMintInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub decimals: u8,
}

#[event]
pub struct StakeAccountCreated {
    pub owner: Pubkey,
    pub account: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub total_points: u64,
    pub timestamp: i64,
}

#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub total_points: u64,
    pub timestamp: i64,
}

#[event]
pub struct PointsRefreshed {
    pub owner: Pubkey,
    pub staked_amount: u64,
    pub total_points: u64,
    pub timestamp: i64,
}

#[event]
pub struct PointsClaimed {
    pub owner: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub timestamp: i64,
}
