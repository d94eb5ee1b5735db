use crate::accrual::ACCRUAL;
use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::guard::validate_program_update_authority;
use crate::state::{MINT_AUTHORITY_SEED, REWARD_MINT_DECIMALS};
use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::token::{self, MintTo};

pub fn initialize_reward_mint(ctx: Context<InitializeRewardMint>) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.signer.key();
    config.reward_mint = ctx.accounts.reward_mint.key();
    config.mint_authority_bump = ctx.bumps.mint_authority;
    config.bump = ctx.bumps.config;

    emit!(RewardMintInitialized {
        admin: ctx.accounts.signer.key(),
        mint: ctx.accounts.reward_mint.key(),
        mint_authority: ctx.accounts.mint_authority.key(),
        decimals: REWARD_MINT_DECIMALS,
    });

    Ok(())
}

pub fn create_pda_account(ctx: Context<CreatePdaAccount>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.payer.key();

    ctx.accounts
        .pda_account
        .initialize(owner, now, ctx.bumps.pda_account)?;

    msg!("Stake account {} created for {}", ctx.accounts.pda_account.key(), owner);

    emit!(StakeAccountCreated {
        owner,
        account: ctx.accounts.pda_account.key(),
        timestamp: now,
    });

    Ok(())
}

pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let system_program = ctx.accounts.system_program.to_account_info();
    let from = ctx.accounts.user.to_account_info();
    let to = ctx.accounts.pda_account.to_account_info();

    let pda_account = &mut ctx.accounts.pda_account;
    pda_account.stake(&user, amount, now, &ACCRUAL, |lamports| {
        transfer(CpiContext::new(system_program, Transfer { from, to }), lamports)
    })?;

    msg!(
        "Staked {} lamports. Total staked: {}, points: {}",
        amount,
        pda_account.staked_amount,
        pda_account.total_points
    );

    emit!(Staked {
        owner: user,
        amount,
        staked_amount: pda_account.staked_amount,
        total_points: pda_account.total_points,
        timestamp: now,
    });

    Ok(())
}

pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let vault = ctx.accounts.pda_account.to_account_info();
    let recipient = ctx.accounts.user.to_account_info();

    let pda_account = &mut ctx.accounts.pda_account;
    pda_account.unstake(&user, amount, now, &ACCRUAL, |lamports| {
        // The stake account is program owned, so lamports move directly.
        let vault_balance = vault
            .lamports()
            .checked_sub(lamports)
            .ok_or(StakeError::Underflow)?;
        let recipient_balance = recipient
            .lamports()
            .checked_add(lamports)
            .ok_or(StakeError::Overflow)?;

        **vault.try_borrow_mut_lamports()? = vault_balance;
        **recipient.try_borrow_mut_lamports()? = recipient_balance;
        Ok(())
    })?;

    msg!(
        "Unstaked {} lamports. Remaining: {}, points: {}",
        amount,
        pda_account.staked_amount,
        pda_account.total_points
    );

    emit!(Unstaked {
        owner: user,
        amount,
        staked_amount: pda_account.staked_amount,
        total_points: pda_account.total_points,
        timestamp: now,
    });

    Ok(())
}

/// Flushes accrual into the record and returns the up-to-date total.
pub fn get_points(ctx: Context<GetPoints>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let pda_account = &mut ctx.accounts.pda_account;
    let total_points = pda_account.refresh_points(&user, now, &ACCRUAL)?;

    msg!(
        "Current points: {}, staked: {} lamports",
        total_points,
        pda_account.staked_amount
    );

    emit!(PointsRefreshed {
        owner: user,
        staked_amount: pda_account.staked_amount,
        total_points,
        timestamp: now,
    });

    Ok(total_points)
}

pub fn claim_points(ctx: Context<ClaimPoints>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();
    let mint_authority_bump = ctx.accounts.config.mint_authority_bump;

    let token_program = ctx.accounts.token_program.to_account_info();
    let cpi_accounts = MintTo {
        mint: ctx.accounts.reward_mint.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.mint_authority.to_account_info(),
    };

    let claimed = ctx
        .accounts
        .pda_account
        .claim_points(&user, now, &ACCRUAL, |points| {
            let seeds: &[&[u8]] = &[MINT_AUTHORITY_SEED, &[mint_authority_bump]];
            let signer = &[&seeds[..]];
            token::mint_to(
                CpiContext::new_with_signer(token_program, cpi_accounts, signer),
                points,
            )
        })?;

    msg!("Claimed {} points for {}", claimed, user);

    emit!(PointsClaimed {
        owner: user,
        amount: claimed,
        mint: ctx.accounts.reward_mint.key(),
        token_account: ctx.accounts.user_token_account.key(),
        timestamp: now,
    });

    Ok(())
}
