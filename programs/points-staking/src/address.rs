use crate::state::{
    StakeAccount, CONFIG_SEED, MINT_AUTHORITY_SEED, REWARD_MINT_SEED, STAKE_ACCOUNT_SEED,
};
use anchor_lang::prelude::*;

/// Stake account address and canonical bump for `owner`. Clients recompute
/// this instead of keeping an owner to account map.
pub fn stake_account_address(owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKE_ACCOUNT_SEED, owner.as_ref()], &crate::ID)
}

/// Program signer for reward mints. Never collides with a stake account
/// because its seeds carry no owner.
pub fn mint_authority_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINT_AUTHORITY_SEED], &crate::ID)
}

pub fn reward_mint_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_MINT_SEED], &crate::ID)
}

pub fn config_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], &crate::ID)
}

/// Re-derives the address from the record's own owner and bump.
pub fn verify_stake_account_address(account: &StakeAccount, address: &Pubkey) -> bool {
    Pubkey::create_program_address(
        &[STAKE_ACCOUNT_SEED, account.owner.as_ref(), &[account.bump]],
        &crate::ID,
    )
    .map(|derived| derived == *address)
    .unwrap_or(false)
}
