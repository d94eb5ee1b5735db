use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct InitializeRewardMint<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = RewardConfig::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, RewardConfig>,

    #[account(
        init,
        payer = signer,
        seeds = [REWARD_MINT_SEED],
        bump,
        mint::decimals = REWARD_MINT_DECIMALS,
        mint::authority = mint_authority,
    )]
    pub reward_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that acts as mint authority, validated by seeds constraint.
    /// It holds no data and only signs mint_to on claims.
    #[account(
        seeds = [MINT_AUTHORITY_SEED],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == bpf_loader_upgradeable::get_program_data_address(&crate::ID) @ StakeError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct CreatePdaAccount<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    // init_if_needed so a second create reaches the handler and fails with
    // AlreadyInitialized instead of a system program error
    #[account(
        init_if_needed,
        payer = payer,
        space = StakeAccount::LEN,
        seeds = [STAKE_ACCOUNT_SEED, payer.key().as_ref()],
        bump
    )]
    pub pda_account: Account<'info, StakeAccount>,

    pub system_program: Program<'info, System>,
}

// Seeds come from the stored owner so a foreign signer reaches the owner
// constraint and fails with Unauthorized rather than a seeds mismatch.
#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, pda_account.owner.as_ref()],
        bump = pda_account.bump,
        constraint = pda_account.owner == user.key() @ StakeError::Unauthorized
    )]
    pub pda_account: Account<'info, StakeAccount>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, pda_account.owner.as_ref()],
        bump = pda_account.bump,
        constraint = pda_account.owner == user.key() @ StakeError::Unauthorized
    )]
    pub pda_account: Account<'info, StakeAccount>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct GetPoints<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, pda_account.owner.as_ref()],
        bump = pda_account.bump,
        constraint = pda_account.owner == user.key() @ StakeError::Unauthorized
    )]
    pub pda_account: Account<'info, StakeAccount>,
}

#[derive(Accounts)]
pub struct ClaimPoints<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, pda_account.owner.as_ref()],
        bump = pda_account.bump,
        constraint = pda_account.owner == user.key() @ StakeError::Unauthorized
    )]
    pub pda_account: Account<'info, StakeAccount>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, RewardConfig>,

    #[account(
        mut,
        address = config.reward_mint @ StakeError::InvalidRewardMint,
        constraint = reward_mint.mint_authority == COption::Some(mint_authority.key()) @ StakeError::InvalidMintAuthority
    )]
    pub reward_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that acts as mint authority, validated by seeds constraint
    #[account(
        seeds = [MINT_AUTHORITY_SEED],
        bump = config.mint_authority_bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    // Must already exist; the client creates the associated token account
    // before claiming.
    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ StakeError::Unauthorized,
        constraint = user_token_account.mint == reward_mint.key() @ StakeError::InvalidTokenAccount
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
